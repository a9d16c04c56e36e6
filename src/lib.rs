//! # gitaura
//!
//! A CLI tool that creates a git repository with a backdated commit history
//! and optionally publishes it to GitHub.
//!
//! This crate provides functionality to:
//! - Prepare a target directory and connect it to a GitHub repository,
//!   through the GitHub CLI or a manually entered URL
//! - Spread a number of commits at random over a date range
//! - Write one commit per planned slot, dated to midnight UTC of its day
//! - Push the result to `origin`
//!
//! ## Usage
//!
//! ```bash
//! # Interactive run with a random distribution
//! gitaura
//!
//! # Reproducible distribution, custom default directory
//! gitaura --seed 42 --dir ~/projects/history
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`distribute`] - Commit distribution over a date range
//! - [`remote`] - Repository and `origin` setup
//! - [`backdate`] - Backdated commit creation
//! - [`git`] - Git command wrappers
//! - [`gh`] - GitHub CLI wrappers
//! - [`prompt`] - User input abstractions
//! - [`banner`] - Plan summary banner

pub mod backdate;
pub mod banner;
pub mod cli;
pub mod distribute;
pub mod gh;
pub mod git;
pub mod prompt;
pub mod remote;
