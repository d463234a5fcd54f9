//! Fixed keys under which quiz state is persisted.

/// Last-used difficulty filter (`any|easy|medium|hard`).
pub const DIFFICULTY: &str = "qa_difficulty";

/// Last-used question count, stored as a decimal string.
pub const AMOUNT: &str = "qa_amount";

/// Serialized results record of the most recently completed quiz.
pub const RESULTS: &str = "qa_results";
