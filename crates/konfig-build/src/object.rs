use crate::{GeneratedUnit, GenerationUnit, Visibility};
use convert_case::{Case, Casing};
use konfig_schema::{
    node::FieldSpec,
    resolve::{DeclarationSet, ResolvedConfig},
    types::{Kind, TemplateTable},
    validate::naming::const_name,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse_str;

///
/// EmitMode
///
/// The three object renderings. One emit path dispatches on this tag with a
/// per-mode field treatment instead of a generator hierarchy.
///

#[derive(Clone, Copy, Debug)]
pub enum EmitMode<'a> {
    /// Value-bearing object with no cross-target contract.
    Plain(&'a ResolvedConfig),

    /// Declaration-only stub for the common scope.
    Declaration(&'a DeclarationSet),

    /// Value-bearing object satisfying the common stub for one target.
    Implementation(&'a ResolvedConfig),
}

///
/// ObjectBuilder
///

pub struct ObjectBuilder<'a> {
    package: &'a str,
    object: &'a str,
    visibility: Visibility,
    templates: &'a TemplateTable,
}

impl<'a> ObjectBuilder<'a> {
    #[must_use]
    pub fn new(unit: &'a GenerationUnit, templates: &'a TemplateTable) -> Self {
        Self {
            package: &unit.package,
            object: &unit.object,
            visibility: unit.visibility,
            templates,
        }
    }

    /// Emit one generated unit for the given mode.
    #[must_use]
    pub fn emit(&self, mode: EmitMode<'_>) -> GeneratedUnit {
        let tokens = match mode {
            EmitMode::Plain(config) => self.plain(config),
            EmitMode::Declaration(common) => self.declaration(common),
            EmitMode::Implementation(config) => self.implementation(config),
        };

        let target = match mode {
            EmitMode::Declaration(_) => None,
            EmitMode::Plain(config) | EmitMode::Implementation(config) => {
                Some(config.target.clone())
            }
        };

        GeneratedUnit {
            target,
            file_name: format!("{}.rs", self.object.to_case(Case::Snake)),
            source: render_source(tokens),
        }
    }

    // standalone object: inherent constants only
    fn plain(&self, config: &ResolvedConfig) -> TokenStream {
        let vis = self.vis();
        let object = format_ident!("{}", self.object);
        let consts: Vec<TokenStream> = config
            .fields
            .values()
            .map(|field| {
                let name = format_ident!("{}", const_name(&field.name));
                let ty = type_tokens(field.kind);
                let value = literal_tokens(field, self.templates);

                quote! { #vis const #name: #ty = #value; }
            })
            .collect();

        let body = if consts.is_empty() {
            quote!()
        } else {
            quote! {
                impl #object {
                    #(#consts)*
                }
            }
        };

        quote! {
            #vis struct #object;

            #body
        }
    }

    // stub trait: names and types, no initializers
    fn declaration(&self, common: &DeclarationSet) -> TokenStream {
        let vis = self.vis();
        let object = format_ident!("{}", self.object);
        let consts = common.fields.iter().map(|(name, kind)| {
            let name = format_ident!("{}", const_name(name));
            let ty = type_tokens(*kind);

            quote! { const #name: #ty; }
        });

        quote! {
            #vis trait #object {
                #(#consts)*
            }
        }
    }

    // trait impl binds every shared field to the stub; target-only fields
    // stay inherent with no stub binding
    fn implementation(&self, config: &ResolvedConfig) -> TokenStream {
        let vis = self.vis();
        let object = format_ident!("{}", self.object);
        let stub = self.stub_path();

        let shared: Vec<TokenStream> = config
            .shared_fields()
            .map(|field| {
                let name = format_ident!("{}", const_name(&field.name));
                let ty = type_tokens(field.kind);
                let value = literal_tokens(field, self.templates);

                quote! { const #name: #ty = #value; }
            })
            .collect();

        let own: Vec<TokenStream> = config
            .own_fields()
            .map(|field| {
                let name = format_ident!("{}", const_name(&field.name));
                let ty = type_tokens(field.kind);
                let value = literal_tokens(field, self.templates);

                quote! { #vis const #name: #ty = #value; }
            })
            .collect();

        let own_body = if own.is_empty() {
            quote!()
        } else {
            quote! {
                impl #object {
                    #(#own)*
                }
            }
        };

        quote! {
            #vis struct #object;

            impl #stub for #object {
                #(#shared)*
            }

            #own_body
        }
    }

    fn stub_path(&self) -> syn::Path {
        let path = format!("{}::{}", self.package, self.object);

        parse_str(&path).unwrap_or_else(|_| panic!("invalid package path: {}", self.package))
    }

    fn vis(&self) -> TokenStream {
        match self.visibility {
            Visibility::Exposed => quote!(pub),
            Visibility::Internal => quote!(pub(crate)),
        }
    }
}

fn type_tokens(kind: Kind) -> TokenStream {
    kind.rust_type()
        .parse()
        .unwrap_or_else(|_| panic!("invalid type for kind {kind}"))
}

// Rendered literals are valid Rust by construction of the templates.
fn literal_tokens(field: &FieldSpec, templates: &TemplateTable) -> TokenStream {
    field
        .render(templates)
        .parse()
        .unwrap_or_else(|_| panic!("invalid literal for field '{}'", field.name))
}

fn render_source(tokens: TokenStream) -> String {
    let file =
        syn::parse2(tokens).unwrap_or_else(|e| panic!("emitted unit failed to parse: {e}"));

    prettyplease::unparse(&file)
}
