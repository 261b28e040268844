//! Ordered UI scenarios for the TodoMVC application
//!
//! The page object translates user actions into DOM operations; the
//! scenarios call it in a fixed order against one shared browser session
//! and assert the expected UI state after each action.

pub mod context;
pub mod page;
pub mod scenarios;

pub use context::{AppConfig, TodoContext};
pub use page::{TodoItem, TodoPage};
