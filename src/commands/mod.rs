// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod revenues;
pub mod expenses;
pub mod summary;
pub mod customers;
pub mod users;
pub mod exporter;
pub mod dashboard;
pub mod settings;
