//! Tests for the statement outline

use sql_dump_reorder::dump::LineSequence;
use sql_dump_reorder::outline::{outline, render_outline, StatementKind};

#[test]
fn test_outline_of_pg_dump_order() {
    // Function before tables, the order pg_dump produced
    let dump = LineSequence::from_text(
        "CREATE TYPE public.user_role AS ENUM ('owner', 'student');\n\
         \n\
         CREATE OR REPLACE FUNCTION public.user_org_id()\n\
         \x20RETURNS uuid\n\
         \x20LANGUAGE sql\n\
         AS $function$\n\
         \x20 SELECT org_id FROM public.users WHERE id = auth.uid()\n\
         $function$;\n\
         \n\
         CREATE TABLE public.users (\n\
         \x20   id uuid NOT NULL\n\
         );\n",
    );

    let sections = outline(dump.lines(), None);
    let kinds: Vec<StatementKind> = sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::EnumType,
            StatementKind::Function,
            StatementKind::Table
        ]
    );
    assert_eq!(sections[1].first_line, 3);
    assert_eq!(sections[2].first_line, 10);
}

#[test]
fn test_outline_of_empty_dump() {
    let dump = LineSequence::from_text("-- nothing here\n\n");
    let sections = outline(dump.lines(), None);

    assert!(sections.is_empty());
    assert!(render_outline(&sections).is_empty());
}

#[test]
fn test_functions_collapse_into_one_section() {
    let dump = LineSequence::from_text(
        "CREATE FUNCTION public.a() RETURNS int LANGUAGE sql AS $$ SELECT 1 $$;\n\
         CREATE FUNCTION public.b() RETURNS int LANGUAGE sql AS $$ SELECT 2 $$;\n",
    );

    let sections = outline(dump.lines(), None);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].count, 2);
    assert_eq!(
        render_outline(&sections),
        vec!["  1. functions: public.a, public.b [line 1, 2 statements]".to_string()]
    );
}
