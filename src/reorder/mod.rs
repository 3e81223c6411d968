//! Move a statement block to later in a SQL dump
//!
//! `pg_dump` emits functions before the tables they select from. Functions
//! declared `LANGUAGE sql` are validated at creation time, so restoring such a
//! dump fails until the function is moved below the table definitions. This
//! module finds the block, lifts it out, and splices it back in after an
//! anchor statement.

pub mod locate;
mod relocate;

pub use locate::{find_anchor, find_block, find_first, Anchor, BlockSpan, MarkerMatch};
pub use relocate::{plan_removal, relocate, Relocation};

/// Markers and commentary driving one relocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRules {
    /// Substring on the first line of the block
    pub block_start: String,
    /// Substring on the last line of the block
    pub block_end: String,
    /// Substring on the statement the block is moved after
    pub anchor: String,
    /// Substring required on the line right after the anchor
    pub anchor_follow: String,
    /// Statement the relocated block must still precede
    pub guard: Option<String>,
    /// Comment lines written above the relocated block
    pub comments: Vec<String>,
    pub matcher: MarkerMatch,
}

impl Default for RelocationRules {
    fn default() -> Self {
        Self {
            block_start: "CREATE OR REPLACE FUNCTION public.user_org_id()".to_string(),
            block_end: "$function$;".to_string(),
            anchor: "ALTER TABLE ONLY public.users".to_string(),
            anchor_follow: "ADD CONSTRAINT users_pkey".to_string(),
            guard: Some("CREATE TRIGGER".to_string()),
            comments: vec![
                "-- Create helper function for getting current user's organization".to_string(),
                "-- NOTE: This function must be created AFTER tables are defined".to_string(),
            ],
            matcher: MarkerMatch::default(),
        }
    }
}
