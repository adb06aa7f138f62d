pub mod apparatus;
pub mod divergence;
pub mod needleman_wunsch;
pub mod normalization;
pub mod report;
pub mod segmentation;
pub mod synchronization;
