//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain.
//!
//! - **[`users`]**: account endpoints
//!   - `POST /api/users/signup` - register an account
//!   - `POST /api/users/login` - verify credentials
//!
//! Handlers take their service from shared state via `State<_>` and return
//! `Result<T, AppError>`; `AppError` renders itself as a status and plain text body.

pub mod users;
