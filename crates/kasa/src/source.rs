//! API-backed page and option sources.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use kasa_core::resource::{self, Resource, decode_page};
use kasa_core::{
    Api, InvalidInputError, ListPage, ListQuery, OptionSource, OptionValue, PageSource, Result,
    SelectOption,
};
use serde_json::Value;
use tracing::debug;

/// Options requested per search.
pub const DEFAULT_OPTION_LIMIT: u32 = 50;

/// Pages of resource `R` fetched through an [`Api`].
pub struct RemoteList<R, A: ?Sized> {
    api: Arc<A>,
    per_page: u32,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, A: Api + ?Sized> RemoteList<R, A> {
    pub fn new(api: Arc<A>, per_page: u32) -> Self {
        Self {
            api,
            per_page,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R, A> PageSource for RemoteList<R, A>
where
    R: Resource,
    A: Api + ?Sized + 'static,
{
    type Item = R::Item;

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<R::Item>> {
        resource::list::<R, A>(&*self.api, query, self.per_page).await
    }
}

/// A remote catalog a select can search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionCatalog {
    Contacts,
    TaxOffices,
    Cities,
    Products,
    Warehouses,
    Vehicles,
}

impl OptionCatalog {
    pub const ALL: [OptionCatalog; 6] = [
        Self::Contacts,
        Self::TaxOffices,
        Self::Cities,
        Self::Products,
        Self::Warehouses,
        Self::Vehicles,
    ];

    /// Endpoint path below the API base.
    pub fn path(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::TaxOffices => "tax-offices",
            Self::Cities => "cities",
            Self::Products => "products",
            Self::Warehouses => "warehouses",
            Self::Vehicles => "vehicles",
        }
    }

    /// Turn one catalog item into an option.
    ///
    /// Items without an id or a label are skipped.
    pub fn to_option(self, item: &Value) -> Option<SelectOption> {
        let value = OptionValue::from_json(item.get("id")?)?;

        let (label, subtitle) = match self {
            Self::Contacts => (
                text(item, "name")?,
                text(item, "tax_number").or_else(|| text(item, "city")),
            ),
            Self::TaxOffices => (text(item, "name")?, text(item, "city")),
            Self::Cities => (text(item, "name")?, None),
            Self::Products => (
                text(item, "name")?,
                text(item, "sku").or_else(|| text(item, "code")),
            ),
            Self::Warehouses => (text(item, "name")?, text(item, "location")),
            Self::Vehicles => {
                let make = [text(item, "brand"), text(item, "model")]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                (text(item, "plate")?, (!make.is_empty()).then_some(make))
            }
        };

        let option = SelectOption::new(value, label);
        Some(match subtitle {
            Some(subtitle) => option.with_subtitle(subtitle),
            None => option,
        })
    }
}

impl fmt::Display for OptionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for OptionCatalog {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|catalog| catalog.path() == s)
            .ok_or_else(|| InvalidInputError::Other {
                message: format!("unknown catalog: {}", s),
            })
    }
}

/// Non-blank text at `key`, or the `name` of an object at `key`.
fn text(item: &Value, key: &str) -> Option<String> {
    let value = match item.get(key)? {
        Value::Object(map) => map.get("name")?,
        other => other,
    };
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Options of one catalog searched through an [`Api`].
pub struct RemoteOptions<A: ?Sized> {
    api: Arc<A>,
    catalog: OptionCatalog,
    limit: u32,
}

impl<A: Api + ?Sized> RemoteOptions<A> {
    pub fn new(api: Arc<A>, catalog: OptionCatalog) -> Self {
        Self {
            api,
            catalog,
            limit: DEFAULT_OPTION_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn catalog(&self) -> OptionCatalog {
        self.catalog
    }
}

#[async_trait]
impl<A> OptionSource for RemoteOptions<A>
where
    A: Api + ?Sized + 'static,
{
    async fn search(&self, query: &str) -> Result<Vec<SelectOption>> {
        let mut params = vec![("per_page".to_string(), self.limit.to_string())];
        let term = query.trim();
        if !term.is_empty() {
            params.push(("search".to_string(), term.to_string()));
        }

        let body = self.api.get(self.catalog.path(), &params).await?;
        let page: ListPage<Value> = decode_page(body)?;
        let options: Vec<_> = page
            .items
            .iter()
            .filter_map(|item| self.catalog.to_option(item))
            .collect();
        debug!(catalog = %self.catalog, query = term, count = options.len(), "Options fetched");
        Ok(options)
    }
}
