// ABOUTME: Re-exports command modules for ayurdiet-cli
// ABOUTME: Provides planning and constitution assessment commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod constitution;
pub mod plan;
