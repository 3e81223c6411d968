//! Integration tests for the reorder workflow
//!
//! Run the library end to end against fixture dumps shaped like a Supabase
//! `pg_dump` export.

use pretty_assertions::assert_eq;

use sql_dump_reorder::outline::StatementKind;
use sql_dump_reorder::{ReorderError, ReorderOptions, RelocationRules};

use crate::common::{lines_of, TestContext};

const FUNCTION_HEAD: &str = "CREATE OR REPLACE FUNCTION public.user_org_id()\n";

// ============================================================================
// Successful relocation
// ============================================================================

#[test]
fn test_reorder_fixture_dump() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let summary = ctx.reorder_successfully();

    assert!(summary.written);
    assert!(ctx.output_path().exists(), "Output dump should exist");
    assert_eq!(summary.routine.as_deref(), Some("public.user_org_id"));

    let relocation = &summary.relocation;
    assert_eq!(relocation.block.start, 21);
    assert_eq!(relocation.block.end, 28);
    assert_eq!(relocation.removed, 20..30);
    assert_eq!(relocation.insert_at, 46);
    assert_eq!(relocation.relocated_at, 49);
    assert_eq!(summary.total_lines(), 67);
}

#[test]
fn test_output_matches_returned_sequence() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let summary = ctx.reorder_successfully();

    assert_eq!(ctx.read_output(), summary.relocation.output.to_text());
}

#[test]
fn test_non_relocated_lines_keep_their_order() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let summary = ctx.reorder_successfully();
    let relocation = &summary.relocation;

    let input = lines_of(&ctx.read_input());
    let output = lines_of(&ctx.read_output());

    let mut expected = input.clone();
    expected.drain(relocation.removed.clone());

    // One blank line and two comment lines above the block, two blanks below
    let inserted_start = relocation.relocated_at - 3;
    let inserted_end = relocation.relocated_at + relocation.block.len() + 2;
    let mut actual = output.clone();
    actual.drain(inserted_start..inserted_end);

    assert_eq!(actual, expected);
}

#[test]
fn test_block_is_verbatim_after_anchor_and_before_triggers() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let summary = ctx.reorder_successfully();
    let relocation = &summary.relocation;

    let input = lines_of(&ctx.read_input());
    let output = lines_of(&ctx.read_output());

    let block_in = &input[relocation.block.start..relocation.block.end];
    let at = relocation.relocated_at;
    let block_out = &output[at..at + relocation.block.len()];
    assert_eq!(block_out, block_in);

    assert_eq!(
        output[at - 2..at].to_vec(),
        vec![
            "-- Create helper function for getting current user's organization\n".to_string(),
            "-- NOTE: This function must be created AFTER tables are defined\n".to_string(),
        ]
    );

    let anchor = output
        .iter()
        .position(|l| l.contains("ADD CONSTRAINT users_pkey"))
        .expect("anchor present");
    let trigger = output
        .iter()
        .position(|l| l.starts_with("CREATE TRIGGER"))
        .expect("trigger present");
    assert!(anchor < at, "block should follow the anchor");
    assert!(at < trigger, "block should precede CREATE TRIGGER");

    assert_eq!(
        output.iter().filter(|l| l.as_str() == FUNCTION_HEAD).count(),
        1,
        "function should appear exactly once"
    );
}

#[test]
fn test_outline_of_rewritten_dump() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let summary = ctx.reorder_successfully();

    let kinds: Vec<StatementKind> = summary.outline.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::EnumType,
            StatementKind::Function,
            StatementKind::Table,
            StatementKind::Insert,
            StatementKind::Constraint,
            StatementKind::Relocated,
            StatementKind::Trigger,
            StatementKind::ForeignKey,
            StatementKind::Policy,
            StatementKind::RowLevelSecurity,
        ]
    );

    let relocated = &summary.outline[5];
    assert_eq!(relocated.first_line, summary.relocation.relocated_at + 1);
    assert_eq!(relocated.names, vec!["public.user_org_id".to_string()]);
    assert_eq!(summary.outline[4].count, 3);
    assert_eq!(summary.outline[9].count, 2);
}

#[test]
fn test_dry_run_writes_nothing() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let summary = sql_dump_reorder::reorder_dump(ReorderOptions {
        dry_run: true,
        ..ctx.options()
    })
    .unwrap();

    assert!(!summary.written);
    assert!(!ctx.output_path().exists());
    assert_eq!(summary.total_lines(), 67);
}

#[test]
fn test_crlf_dump_keeps_line_endings() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let crlf = ctx.read_input().replace('\n', "\r\n");
    let ctx = TestContext::with_dump(&crlf);

    let summary = ctx.reorder_successfully();
    let output = ctx.read_output();

    assert_eq!(summary.relocation.relocated_at, 49);
    assert!(output.contains("CREATE OR REPLACE FUNCTION public.user_org_id()\r\n"));
    assert!(output.contains("    ADD CONSTRAINT users_pkey PRIMARY KEY (id);\r\n"));
}

#[test]
fn test_custom_rules() {
    let ctx = TestContext::with_dump(
        "-- touch\n\
         CREATE FUNCTION app.touch() RETURNS trigger AS $$\n\
         BEGIN NEW.seen = now(); RETURN NEW; END;\n\
         $$ LANGUAGE plpgsql;\n\
         \n\
         CREATE TABLE app.events (id int, seen timestamptz);\n\
         \n\
         ALTER TABLE ONLY app.events\n\
         \x20   ADD CONSTRAINT events_pkey PRIMARY KEY (id);\n\
         \n\
         CREATE TRIGGER touch BEFORE UPDATE ON app.events FOR EACH ROW EXECUTE FUNCTION app.touch();\n",
    );

    let rules = RelocationRules {
        block_start: "CREATE FUNCTION app.touch()".to_string(),
        block_end: "LANGUAGE plpgsql;".to_string(),
        anchor: "ALTER TABLE ONLY app.events".to_string(),
        anchor_follow: "events_pkey".to_string(),
        comments: vec!["moved below app.events".to_string()],
        ..RelocationRules::default()
    };
    let summary = sql_dump_reorder::reorder_dump(ReorderOptions {
        rules,
        ..ctx.options()
    })
    .unwrap();

    assert_eq!(summary.routine.as_deref(), Some("app.touch"));
    assert_eq!(
        ctx.read_output(),
        "CREATE TABLE app.events (id int, seen timestamptz);\n\
         \n\
         ALTER TABLE ONLY app.events\n\
         \x20   ADD CONSTRAINT events_pkey PRIMARY KEY (id);\n\
         \n\
         \n\
         -- moved below app.events\n\
         CREATE FUNCTION app.touch() RETURNS trigger AS $$\n\
         BEGIN NEW.seen = now(); RETURN NEW; END;\n\
         $$ LANGUAGE plpgsql;\n\
         \n\
         \n\
         CREATE TRIGGER touch BEFORE UPDATE ON app.events FOR EACH ROW EXECUTE FUNCTION app.touch();\n"
    );
}

// ============================================================================
// Failures leave no output behind
// ============================================================================

#[test]
fn test_missing_function_fails() {
    let ctx = TestContext::with_fixture("missing_markers");
    let err = ctx.reorder().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReorderError>(),
        Some(ReorderError::MarkerNotFound { .. })
    ));
    assert!(!ctx.output_path().exists(), "No output on failure");
}

#[test]
fn test_missing_anchor_fails() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let without_pkey = ctx
        .read_input()
        .replace("ADD CONSTRAINT users_pkey", "ADD CONSTRAINT users_id_key");
    let ctx = TestContext::with_dump(&without_pkey);

    let err = ctx.reorder().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReorderError>(),
        Some(ReorderError::AnchorNotFound { .. })
    ));
    assert!(!ctx.output_path().exists(), "No output on failure");
}

#[test]
fn test_unterminated_function_fails() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let input = ctx.read_input();
    // Drop every closing quote after the target function starts
    let head_at = input.find(FUNCTION_HEAD).unwrap();
    let truncated = format!(
        "{}{}",
        &input[..head_at],
        input[head_at..].replace("$function$;", "$function$")
    );
    let ctx = TestContext::with_dump(&truncated);

    let err = ctx.reorder().unwrap_err();
    match err.downcast_ref::<ReorderError>() {
        Some(ReorderError::UnterminatedBlock { start_line, .. }) => assert_eq!(*start_line, 22),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!ctx.output_path().exists(), "No output on failure");
}

#[test]
fn test_trigger_before_anchor_fails() {
    let ctx = TestContext::with_fixture("supabase_dump");
    let input = ctx.read_input();
    let trigger = "CREATE TRIGGER update_users_updated_at BEFORE UPDATE ON public.users \
                   FOR EACH ROW EXECUTE FUNCTION public.update_updated_at_column();\n\n";
    let moved = input.replace(trigger, "").replacen(
        "INSERT INTO public.organizations",
        &format!("{}INSERT INTO public.organizations", trigger),
        1,
    );
    let ctx = TestContext::with_dump(&moved);

    let err = ctx.reorder().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReorderError>(),
        Some(ReorderError::GuardViolation { .. })
    ));
    assert!(!ctx.output_path().exists(), "No output on failure");
}

#[test]
fn test_missing_input_file_fails() {
    let ctx = TestContext::with_dump("");
    let err = sql_dump_reorder::reorder_dump(ReorderOptions {
        input_path: ctx.dump_dir.join("nope.sql"),
        ..ctx.options()
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReorderError>(),
        Some(ReorderError::InputReadError { .. })
    ));
}
