// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the VANTA application.

pub mod annotations;
pub mod canvas;
pub mod effects;
pub mod focus;
pub mod timeline;
pub mod timestamps;
pub mod toolbar;
