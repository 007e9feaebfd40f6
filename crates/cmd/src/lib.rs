// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod commands;
pub mod common;
pub mod error_utils;
pub mod template_utils;
