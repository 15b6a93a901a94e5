// ABOUTME: DOM helpers shared by the extractors: text rendering, visibility filters, candidate scoring.
// ABOUTME: All walks are iterative so deeply nested pages cannot exhaust the stack.

pub mod filters;
pub mod scoring;
pub mod text;
