//! Procedural macro for the `hfsm` crate.
//!
//! This crate provides the `machine!` macro: it declares the name, state,
//! payload and data types of a machine, its initial state, and its
//! transition list, and emits the unit struct + `Machine` trait impl a
//! machine author would otherwise write by hand. The transitions themselves
//! are plain `hfsm::core::builder` chains (`from(..).on(..)...to(..)`);
//! this macro does not invent its own transition grammar.
//!
//! # Example
//!
//! ```ignore
//! use hfsm::{machine, core::builder::*};
//!
//! machine! {
//!     name: Door,
//!     state: DoorState,
//!     payload: DoorEvent,
//!     data: (),
//!     initial: DoorState::Closed,
//!     transitions: [
//!         from(DoorState::Closed).on(DoorEventId::Open).to(DoorState::Open),
//!         from(DoorState::Open).on(DoorEventId::Close).to(DoorState::Closed),
//!     ],
//! }
//! ```

use proc_macro::TokenStream;

mod codegen;
mod parse;

use parse::MachineDecl;

/// Define a machine: a unit struct implementing `hfsm::core::Machine`.
#[proc_macro]
pub fn machine(input: TokenStream) -> TokenStream {
    let decl = syn::parse_macro_input!(input as MachineDecl);
    match decl.expand() {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
