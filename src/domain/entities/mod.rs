//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without transport or storage
//! concerns. Creation inputs and partial updates get their own structs
//! (`NewTour`, `TourPatch`, `NewUser`, `UserPatch`) so a half-built
//! record can never masquerade as a persisted one.

pub mod tour;
pub mod user;

pub use tour::{CommissionType, ContactType, NewTour, PaymentStatus, Tour, TourPatch};
pub use user::{NewUser, User, UserPatch};
