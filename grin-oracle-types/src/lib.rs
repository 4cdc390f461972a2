//! Wire types exchanged with clients of the payment-proof oracle.
//!
//! Field elements and curve points travel as decimal strings (points as a
//! two-element `[x, y]` sequence), which keeps the JSON readable and
//! independent of any particular binary field encoding.

pub mod api;
pub mod fields;
