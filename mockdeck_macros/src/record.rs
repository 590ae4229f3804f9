use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

#[derive(Default)]
struct StructOptions {
    collection: Option<String>,
    order_by: Option<Ident>,
    descending: bool,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let options = struct_options(input)?;
    let fields = named_fields(input)?;

    let id_field = match marked_field(&fields, "id")? {
        Some(ident) => ident,
        None => fields
            .iter()
            .filter_map(|field| field.ident.clone())
            .find(|ident| ident == "id")
            .ok_or_else(|| {
                syn::Error::new_spanned(
                    name,
                    "Record derive: no field marked with #[record(id)] and no field named `id`",
                )
            })?,
    };

    let collection = options
        .collection
        .unwrap_or_else(|| format!("{}s", to_snake_case(&name.to_string())));

    let stamp_created = match marked_field(&fields, "created_at")? {
        Some(field) => quote! {
            fn stamp_created(&mut self, now: mockdeck::Timestamp) {
                self.#field = now;
            }
        },
        None => quote! {},
    };

    let natural_order = match &options.order_by {
        Some(field) => {
            let primary = if options.descending {
                quote! { other.#field.cmp(&self.#field) }
            } else {
                quote! { self.#field.cmp(&other.#field) }
            };
            quote! {
                fn natural_order(&self, other: &Self) -> ::std::cmp::Ordering {
                    #primary.then_with(|| self.#id_field.cmp(&other.#id_field))
                }
            }
        }
        None => quote! {},
    };

    Ok(quote! {
        impl mockdeck::Record for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> mockdeck::RecordId {
                self.#id_field
            }

            fn set_id(&mut self, id: mockdeck::RecordId) {
                self.#id_field = id;
            }

            #stamp_created

            #natural_order
        }
    })
}

fn struct_options(input: &DeriveInput) -> syn::Result<StructOptions> {
    let mut options = StructOptions::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                options.collection = Some(value.value());
            } else if meta.path.is_ident("order_by") {
                let value: LitStr = meta.value()?.parse()?;
                options.order_by = Some(value.parse()?);
            } else if meta.path.is_ident("descending") {
                options.descending = true;
            } else {
                return Err(meta.error("unsupported record option"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<Field>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields.named.iter().cloned().collect());
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        "Record derive only supports structs with named fields",
    ))
}

fn marked_field(fields: &[Field], marker: &str) -> syn::Result<Option<Ident>> {
    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }

            let mut found = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(marker) {
                    found = true;
                }
                Ok(())
            })?;

            if found {
                return Ok(field.ident.clone());
            }
        }
    }

    Ok(None)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
