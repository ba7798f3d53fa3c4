use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Error, Field, Generics, Result};

/// Derives `softpipe::Interpolate` for a struct with named fields by
/// interpolating every field with the same barycentric weights.
#[proc_macro_derive(Interpolate)]
pub fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let derive = parse_macro_input!(input as DeriveInput);

    match generate_impl(derive) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
    .into()
}

struct StructInfo {
    name: Ident,
    generics: Generics,
    fields: Vec<Field>,
}

impl StructInfo {
    fn from_derive_input(derive: &DeriveInput) -> Result<Self> {
        let fields: Vec<Field> = if let syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(syn::FieldsNamed { ref named, .. }),
            ..
        }) = derive.data
        {
            named.iter().cloned().collect()
        } else {
            return Err(Error::new(
                Span::call_site(),
                "Interpolate can only be derived for structs with named fields",
            ));
        };

        Ok(Self {
            name: derive.ident.clone(),
            generics: derive.generics.clone(),
            fields,
        })
    }
}

fn generate_field_interpolation(field: &Field) -> Result<TokenStream> {
    let name = field
        .ident
        .as_ref()
        .ok_or_else(|| Error::new(Span::call_site(), "Field must have a name"))?;
    let ty = &field.ty;
    Ok(quote! {
        #name : <#ty as ::softpipe::Interpolate>::interpolate(&v0.#name, &v1.#name, &v2.#name, r0, r1, r2)
    })
}

fn generate_impl(derive: DeriveInput) -> Result<TokenStream> {
    let struct_info = StructInfo::from_derive_input(&derive)?;

    let struct_name = &struct_info.name;
    let (impl_generics, ty_generics, where_clause) = struct_info.generics.split_for_impl();

    let field_assignments = struct_info
        .fields
        .iter()
        .map(generate_field_interpolation)
        .collect::<Result<Vec<TokenStream>>>()?;

    Ok(quote! {
        impl #impl_generics ::softpipe::Interpolate for #struct_name #ty_generics #where_clause {
            fn interpolate(v0 : &Self, v1 : &Self, v2 : &Self, r0 : f32, r1 : f32, r2 : f32) -> Self {
                Self {
                    #(#field_assignments),*
                }
            }
        }
    })
}
