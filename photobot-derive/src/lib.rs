use proc_macro::{self, TokenStream};
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Marks a struct as a Telegram Bot API request body. The struct must live in
/// a module whose parent exports the `Request` trait (i.e. `photobot::api`).
#[proc_macro_derive(BotRequest)]
pub fn photobot_derive_request(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident, generics, ..
    } = parse_macro_input!(input);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let output = quote! {
        impl #impl_generics super::Request for #ident #ty_generics #where_clause {}
    };
    output.into()
}
