//! Lowers a parsed [`MachineDecl`] to the unit struct + `Machine` impl a
//! machine author would otherwise write by hand.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::Result;

use crate::parse::MachineDecl;

impl MachineDecl {
    pub fn expand(&self) -> Result<TokenStream2> {
        let MachineDecl {
            name,
            state_ty,
            payload_ty,
            data_ty,
            initial,
            transitions,
        } = self;

        // Matches the teacher's `let core_path = quote!(::state_machines::core);`:
        // generated code reaches core types through the facade crate, since
        // that is the crate exporting this macro in the first place.
        let core = quote!(::hfsm::core);

        Ok(quote! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct #name;

            impl #core::Machine for #name {
                type State = #state_ty;
                type Payload = #payload_ty;
                type Data = #data_ty;

                const INITIAL: Self::State = #initial;

                fn transitions() -> ::std::vec::Vec<
                    #core::TransitionSpec<Self::State, Self::Payload, Self::Data>
                > {
                    ::std::vec![ #(#transitions),* ]
                }
            }
        })
    }
}
