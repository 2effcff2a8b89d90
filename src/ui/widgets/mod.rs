// src/ui/widgets/mod.rs

pub mod analysis_view; // Flags, flag details and recommendations.
pub mod footer;
pub mod input;
pub mod log_view;
pub mod summary; // Score, verdict, confidence and source status.
