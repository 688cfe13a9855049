/// Atlassian-related transformations (Confluence, Jira)
///
/// This module contains pure transformation functions for Atlassian products.
/// All functions are free of I/O operations and testable with fixture data.
pub mod confluence;
pub mod jira;
