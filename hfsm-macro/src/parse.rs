//! Parses `machine! { ... }` input into a [`MachineDecl`].
//!
//! The grammar only covers the wiring a machine author would otherwise
//! write by hand (name/state/payload/data types, the initial state, and the
//! transition list); each transition entry is parsed as a plain `syn::Expr`
//! and is expected to be a builder chain from `hfsm::core::builder`
//! (`from(..).on(..)....to(..)`, etc). This mirrors `state-machines-macro`'s
//! `parser.rs`/`types.rs` split, scoped down since there is no per-state
//! typestate codegen to drive.

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, Ident, Token, Type, bracketed};

pub struct MachineDecl {
    pub name: Ident,
    pub state_ty: Type,
    pub payload_ty: Type,
    pub data_ty: Type,
    pub initial: Expr,
    pub transitions: Vec<Expr>,
}

fn expect_field(input: ParseStream, field: &str) -> syn::Result<()> {
    let ident: Ident = input.parse()?;
    if ident != field {
        return Err(syn::Error::new(
            ident.span(),
            format!("expected `{field}`, found `{ident}`"),
        ));
    }
    input.parse::<Token![:]>()?;
    Ok(())
}

impl Parse for MachineDecl {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        expect_field(input, "name")?;
        let name: Ident = input.parse()?;
        input.parse::<Token![,]>()?;

        expect_field(input, "state")?;
        let state_ty: Type = input.parse()?;
        input.parse::<Token![,]>()?;

        expect_field(input, "payload")?;
        let payload_ty: Type = input.parse()?;
        input.parse::<Token![,]>()?;

        expect_field(input, "data")?;
        let data_ty: Type = input.parse()?;
        input.parse::<Token![,]>()?;

        expect_field(input, "initial")?;
        let initial: Expr = input.parse()?;
        input.parse::<Token![,]>()?;

        expect_field(input, "transitions")?;
        let content;
        bracketed!(content in input);
        let transitions: Punctuated<Expr, Token![,]> = Punctuated::parse_terminated(&content)?;
        // Trailing comma after the transitions list is optional.
        let _ = input.parse::<Token![,]>();

        Ok(MachineDecl {
            name,
            state_ty,
            payload_ty,
            data_ty,
            initial,
            transitions: transitions.into_iter().collect(),
        })
    }
}
