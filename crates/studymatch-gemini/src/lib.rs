// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini generateContent client and the AI augmentor built on it.

pub mod augment;
pub mod client;
pub mod types;

pub use augment::{GeminiAugmentor, fallback_suggestion};
pub use client::GeminiClient;
