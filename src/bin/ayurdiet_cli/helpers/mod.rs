// ABOUTME: Re-exports helper modules for ayurdiet-cli
// ABOUTME: Provides argument parsing and JSON display utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod parse;
