// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod fixtures;
pub mod i18n;
pub mod models;
pub mod render;
pub mod session;
pub mod utils;
