//! The product query pipeline: filter -> search -> sort -> paginate ->
//! project. Filtering is the AND of every supplied predicate; sorting is
//! stable with ties broken by catalog order; pagination reports the
//! filtered totals; projection reduces each record to a field subset.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;
use crate::models::Product;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

/// Inclusion test over a single product.
pub type Predicate = Box<dyn Fn(&Product) -> bool + Send + Sync>;

/// Query string of `GET /products`, exactly as received. Numeric values
/// stay as strings here so malformed input can be rejected with a 422
/// instead of the framework's generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub fields: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    pub availability_status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validated query parameters. Lives only for the duration of one request.
#[derive(Debug)]
pub struct ProductQuery {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    pub fields: Option<Vec<String>>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub availability_status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        ProductQuery {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by: None,
            order: SortOrder::Asc,
            fields: None,
            category: None,
            brand: None,
            availability_status: None,
            min_price: None,
            max_price: None,
            min_rating: None,
        }
    }
}

impl ProductQuery {
    /// Validates the raw query string. All validation failures surface
    /// before any pipeline stage runs.
    pub fn from_raw(raw: RawProductQuery) -> Result<Self, ApiError> {
        let page = parse_usize("page", raw.page)?.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(ApiError::Validation(
                "Parameter 'page' must be greater than or equal to 1".to_string(),
            ));
        }

        let limit = parse_usize("limit", raw.limit)?.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::Validation(format!(
                "Parameter 'limit' must be between 1 and {MAX_LIMIT}"
            )));
        }

        let order = match raw.order.as_deref() {
            None | Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(other) => {
                return Err(ApiError::Validation(format!(
                    "Parameter 'order' must be 'asc' or 'desc', got '{other}'"
                )))
            }
        };

        let fields = raw.fields.and_then(|s| {
            let names: Vec<String> = s
                .split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect();
            if names.is_empty() { None } else { Some(names) }
        });

        Ok(ProductQuery {
            page,
            limit,
            search: raw.search,
            sort_by: raw.sort_by,
            order,
            fields,
            category: raw.category,
            brand: raw.brand,
            availability_status: raw.availability_status,
            min_price: parse_number("minPrice", raw.min_price)?,
            max_price: parse_number("maxPrice", raw.max_price)?,
            min_rating: parse_number("minRating", raw.min_rating)?,
        })
    }
}

fn parse_number(name: &str, value: Option<String>) -> Result<Option<f64>, ApiError> {
    match value {
        None => Ok(None),
        Some(s) => s.trim().parse::<f64>().map(Some).map_err(|_| {
            ApiError::Validation(format!("Parameter '{name}' must be a number, got '{s}'"))
        }),
    }
}

fn parse_usize(name: &str, value: Option<String>) -> Result<Option<usize>, ApiError> {
    match value {
        None => Ok(None),
        Some(s) => s.trim().parse::<usize>().map(Some).map_err(|_| {
            ApiError::Validation(format!(
                "Parameter '{name}' must be a positive integer, got '{s}'"
            ))
        }),
    }
}

/// One independent predicate per supplied filter criterion; absent
/// criteria contribute nothing. Exact-match filters compare
/// case-sensitively, range filters are inclusive, search is a
/// case-insensitive substring over title/description/brand/tags.
pub fn build_predicates(q: &ProductQuery) -> Vec<Predicate> {
    let mut preds: Vec<Predicate> = Vec::new();

    if let Some(category) = q.category.clone() {
        preds.push(Box::new(move |p| p.category == category));
    }
    if let Some(brand) = q.brand.clone() {
        preds.push(Box::new(move |p| p.brand == brand));
    }
    if let Some(status) = q.availability_status.clone() {
        preds.push(Box::new(move |p| p.availability_status == status));
    }
    if let Some(min) = q.min_price {
        preds.push(Box::new(move |p| p.price >= min));
    }
    if let Some(max) = q.max_price {
        preds.push(Box::new(move |p| p.price <= max));
    }
    if let Some(min) = q.min_rating {
        preds.push(Box::new(move |p| p.rating >= min));
    }
    if let Some(term) = &q.search {
        let term = term.to_lowercase();
        preds.push(Box::new(move |p| p.matches_search(&term)));
    }

    preds
}

fn cmp_str(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Comparator for a sortable field, by wire name. Unknown names are a
/// client error rather than a silent no-op.
fn comparator(field: &str) -> Result<fn(&Product, &Product) -> Ordering, ApiError> {
    let cmp: fn(&Product, &Product) -> Ordering = match field {
        "id" => |a, b| cmp_str(&a.id, &b.id),
        "title" => |a, b| cmp_str(&a.title, &b.title),
        "description" => |a, b| cmp_str(&a.description, &b.description),
        "category" => |a, b| cmp_str(&a.category, &b.category),
        "brand" => |a, b| cmp_str(&a.brand, &b.brand),
        "availabilityStatus" => |a, b| cmp_str(&a.availability_status, &b.availability_status),
        "price" => |a, b| a.price.total_cmp(&b.price),
        "discountPercentage" => |a, b| a.discount_percentage.total_cmp(&b.discount_percentage),
        "rating" => |a, b| a.rating.total_cmp(&b.rating),
        "stock" => |a, b| a.stock.cmp(&b.stock),
        other => return Err(ApiError::InvalidSortField(other.to_string())),
    };
    Ok(cmp)
}

/// One page of query results, in the shape `GET /products` responds with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub page: usize,
    pub limit: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub data: Vec<Value>,
}

/// Runs the full pipeline over the catalog for one validated query.
pub fn run(catalog: &[Product], q: &ProductQuery) -> Result<ProductPage, ApiError> {
    let preds = build_predicates(q);
    let mut filtered: Vec<&Product> = catalog
        .iter()
        .filter(|p| preds.iter().all(|pred| pred(p)))
        .collect();

    if let Some(field) = &q.sort_by {
        let cmp = comparator(field)?;
        // Vec::sort_by is stable, so equal keys keep filtered order in
        // both directions.
        match q.order {
            SortOrder::Asc => filtered.sort_by(|a, b| cmp(a, b)),
            SortOrder::Desc => filtered.sort_by(|a, b| cmp(b, a)),
        }
    }

    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(q.limit).max(1);
    if q.page > total_pages && total_items > 0 {
        return Err(ApiError::PageNotFound {
            page: q.page,
            total_pages,
        });
    }

    // Saturate: an empty result accepts any page, so the offset must not
    // overflow on huge page numbers.
    let offset = (q.page - 1).saturating_mul(q.limit);
    let mut data = Vec::new();
    for product in filtered.iter().skip(offset).take(q.limit) {
        let value = serde_json::to_value(product)?;
        data.push(match &q.fields {
            Some(fields) => project(value, fields),
            None => value,
        });
    }

    Ok(ProductPage {
        page: q.page,
        limit: q.limit,
        total_items,
        total_pages,
        data,
    })
}

/// Keeps only the named fields. Unknown names are ignored silently.
fn project(value: Value, fields: &[String]) -> Value {
    match value {
        Value::Object(mut map) => {
            map.retain(|key, _| fields.iter().any(|f| f == key));
            Value::Object(map)
        }
        other => other,
    }
}
