//! Offering query engine: filter, sort and paginate a snapshot of the
//! offering collection.
//!
//! The engine is a pure synchronous transformation and never fails: query
//! parameters arrive as untrusted, loosely-typed strings and every
//! malformed or out-of-range value degrades to "filter not applied" or the
//! documented default. Strictness belongs to the write path, not here.

use std::cmp::Ordering;

use crate::dto::offering_dto::OfferingListQuery;
use crate::models::offering::Offering;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
/// Hard cap of the legacy bare-array listing mode.
pub const LEGACY_LIMIT: usize = 100;
/// Approximate kilometres per degree of latitude, used by the bounding-box
/// filter. Deliberately a flat-square approximation, not haversine: result
/// parity with the reference matters more than geodesic accuracy.
pub const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Payment,
    Hours,
    Applications,
}

impl SortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "date" => Some(Self::Date),
            "payment" => Some(Self::Payment),
            "hours" => Some(Self::Hours),
            "applications" => Some(Self::Applications),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
}

/// Typed parameter bag produced by coercing a raw [`OfferingListQuery`]
/// exactly once at the boundary. All filters optional, page/limit already
/// normalized.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub min_pay: Option<f64>,
    pub max_pay: Option<f64>,
    pub max_hours: Option<f64>,
    pub has_applications: Option<bool>,
    pub near: Option<GeoFilter>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
    pub featured_first: bool,
    pub page: i64,
    pub limit: i64,
}

impl QueryParams {
    pub fn from_query(raw: &OfferingListQuery) -> Self {
        let lat = parse_f64(raw.lat.as_deref());
        let lng = parse_f64(raw.lng.as_deref());
        let radius_km = parse_f64(raw.radius_km.as_deref()).filter(|r| *r > 0.0);
        let near = match (lat, lng, radius_km) {
            (Some(lat), Some(lng), Some(radius_km)) => Some(GeoFilter {
                lat,
                lng,
                radius_km,
            }),
            _ => None,
        };

        Self {
            search: raw
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            kind: raw.kind.clone().filter(|s| !s.is_empty()),
            min_pay: parse_f64(raw.min_pay.as_deref()),
            max_pay: parse_f64(raw.max_pay.as_deref()),
            max_hours: parse_f64(raw.max_hours.as_deref()),
            has_applications: match raw.has_applications.as_deref() {
                Some("true") => Some(true),
                Some("false") => Some(false),
                _ => None,
            },
            near,
            sort_by: raw.sort_by.as_deref().and_then(SortKey::parse),
            sort_order: raw.sort_order.as_deref().and_then(SortOrder::parse),
            featured_first: raw.featured_first.as_deref() == Some("true"),
            page: parse_positive(raw.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(raw.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Default ordering direction: listings by date read newest-first,
    /// everything else reads ascending.
    fn effective_order(&self, key: SortKey) -> SortOrder {
        self.sort_order.unwrap_or(match key {
            SortKey::Date => SortOrder::Desc,
            _ => SortOrder::Asc,
        })
    }
}

fn parse_f64(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}

/// One page of filtered offerings plus pagination metadata. `total` and
/// `total_pages` describe the full filtered set, not the slice.
#[derive(Debug, Clone)]
pub struct OfferingPage {
    pub items: Vec<Offering>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Run the full pipeline: AND-combined filters, stable sort, slice.
pub fn run(offerings: Vec<Offering>, params: &QueryParams) -> OfferingPage {
    let mut filtered = apply_filters(offerings, params);
    apply_sort(&mut filtered, params);

    let total = filtered.len() as i64;
    let total_pages = if total == 0 {
        0
    } else {
        (total - 1) / params.limit + 1
    };

    // Saturating arithmetic: an absurd page/limit combination yields an
    // empty slice, never a panic.
    let start = usize::try_from((params.page - 1).saturating_mul(params.limit))
        .unwrap_or(usize::MAX);
    let items = filtered
        .into_iter()
        .skip(start)
        .take(usize::try_from(params.limit).unwrap_or(usize::MAX))
        .collect();

    OfferingPage {
        items,
        total,
        page: params.page,
        limit: params.limit,
        total_pages,
    }
}

/// Compatibility shim for the bare-array response mode: same filters, fixed
/// newest-first order, capped at [`LEGACY_LIMIT`], no pagination metadata.
pub fn run_legacy(offerings: Vec<Offering>, params: &QueryParams) -> Vec<Offering> {
    let mut filtered = apply_filters(offerings, params);
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered.truncate(LEGACY_LIMIT);
    filtered
}

fn apply_filters(offerings: Vec<Offering>, params: &QueryParams) -> Vec<Offering> {
    offerings
        .into_iter()
        .filter(|offering| matches(offering, params))
        .collect()
}

fn matches(offering: &Offering, params: &QueryParams) -> bool {
    if let Some(ref search) = params.search {
        let needle = search.to_lowercase();
        let in_label = offering.label.to_lowercase().contains(&needle);
        let in_description = offering
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle));
        if !in_label && !in_description {
            return false;
        }
    }

    if let Some(ref kind) = params.kind {
        if offering.kind != *kind {
            return false;
        }
    }

    if let Some(min_pay) = params.min_pay {
        if offering.payment_per_hour < min_pay {
            return false;
        }
    }
    if let Some(max_pay) = params.max_pay {
        if offering.payment_per_hour > max_pay {
            return false;
        }
    }

    // Ceiling, not a range: "I have at most N hours to give".
    if let Some(max_hours) = params.max_hours {
        if offering.max_hours > max_hours {
            return false;
        }
    }

    if let Some(wants) = params.has_applications {
        if wants != (offering.applications_count > 0) {
            return false;
        }
    }

    if let Some(near) = params.near {
        let d = near.radius_km / KM_PER_DEGREE;
        let lat_ok =
            offering.location.lat >= near.lat - d && offering.location.lat <= near.lat + d;
        let lng_ok =
            offering.location.lng >= near.lng - d && offering.location.lng <= near.lng + d;
        if !lat_ok || !lng_ok {
            return false;
        }
    }

    true
}

fn apply_sort(offerings: &mut [Offering], params: &QueryParams) {
    // Absent or unrecognized key keeps storage order; Vec::sort_by is
    // stable, so equal keys also keep their relative input order.
    if let Some(key) = params.sort_by {
        let order = params.effective_order(key);
        offerings.sort_by(|a, b| {
            let ordering = compare_on(a, b, key);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    if params.featured_first {
        offerings.sort_by_key(|offering| !offering.featured);
    }
}

fn compare_on(a: &Offering, b: &Offering, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.created_at.cmp(&b.created_at),
        SortKey::Payment => a.payment_per_hour.total_cmp(&b.payment_per_hour),
        SortKey::Hours => a.max_hours.total_cmp(&b.max_hours),
        SortKey::Applications => a.applications_count.cmp(&b.applications_count),
    }
}
