use proc_macro::TokenStream;
use quote::quote;

fn get_enum_variants(
    input: &syn::DeriveInput,
) -> &syn::punctuated::Punctuated<syn::Variant, syn::token::Comma> {
    let variants = match &input.data {
        syn::Data::Enum(enum_item) => &enum_item.variants,
        _ => panic!("Input must be an enum."),
    };

    assert!(
        variants.iter().all(|v| v.fields.is_empty()),
        "All variants must have no fields."
    );

    variants
}

/// Implements [`util::EnumFromStr`] (and `std::str::FromStr`) for a
/// fieldless enum, matching variant names case-insensitively against the
/// input.
#[proc_macro_derive(EnumFromStr)]
pub fn enum_from_str_derive(input: TokenStream) -> TokenStream {
    let syn_item: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &syn_item.ident;
    let name_str = name.to_string();
    let variants = get_enum_variants(&syn_item);
    let upper_literals = variants
        .iter()
        .map(|v| v.ident.to_string().to_ascii_uppercase());
    let identifiers = variants.iter().map(|v| &v.ident);

    let expanded = quote! {
        impl ::util::EnumFromStr for #name {
            fn from_str(s: &str) -> Result<#name, ::util::ParseEnumError> {
                match s.to_ascii_uppercase().as_str() {
                    #( #upper_literals => Ok(#name::#identifiers), )*
                    _ => Err(::util::ParseEnumError {
                        value: s.to_string(),
                        enum_name: #name_str,
                    }),
                }
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = ::util::ParseEnumError;

            fn from_str(s: &str) -> Result<#name, ::util::ParseEnumError> {
                ::util::EnumFromStr::from_str(s)
            }
        }
    };

    expanded.into()
}

fn arity_of(variant: &syn::Variant) -> u8 {
    for attr in &variant.attrs {
        if attr.path().is_ident("arity") {
            let lit: syn::LitInt = attr
                .parse_args()
                .unwrap_or_else(|_| panic!("#[arity(N)] on {} must take an integer", variant.ident));
            return lit
                .base10_parse()
                .unwrap_or_else(|_| panic!("#[arity(N)] on {} is out of range", variant.ident));
        }
    }
    panic!("variant {} is missing #[arity(N)]", variant.ident);
}

/// Implements `OpCode::arity(&self) -> u8` by reading a `#[arity(N)]`
/// attribute off every variant. Built from the same `syn::Variant` list
/// walk as `EnumFromStr`, generalized to pull a numeric attribute instead
/// of the variant's own name.
#[proc_macro_derive(OpcodeArity, attributes(arity))]
pub fn opcode_arity_derive(input: TokenStream) -> TokenStream {
    let syn_item: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &syn_item.ident;
    let variants = get_enum_variants(&syn_item);

    let identifiers = variants.iter().map(|v| &v.ident);
    let arities = variants.iter().map(arity_of);

    let expanded = quote! {
        impl #name {
            /// Number of operands this opcode declares in the XML instruction schema.
            pub fn arity(&self) -> u8 {
                match self {
                    #( #name::#identifiers => #arities, )*
                }
            }
        }
    };

    expanded.into()
}
