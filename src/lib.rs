//! Coupon Service - coupon management over HTTP
//!
//! Admins create coupons; customers apply them to a basket value and look
//! them up by code. The crate follows a hexagonal layout: the domain and
//! application layers know nothing about axum or token formats.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
