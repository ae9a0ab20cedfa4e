//! The list envelope `{page, total, <name>: [...]}` and pagination.

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap as _};
use tourclub_core::filter::optional_int;

use crate::error::ApiError;

/// Optional `page` (0-based) and `per_page` query parameters. Without
/// `per_page` the whole result is a single page; as with the filters, an
/// empty value means the parameter was not given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Paging {
  pub page:     String,
  pub per_page: String,
}

fn count(name: &'static str, raw: &str) -> Result<Option<usize>, ApiError> {
  let Some(n) = optional_int(name, raw)? else {
    return Ok(None);
  };
  let n = usize::try_from(n).map_err(|_| tourclub_core::Error::parameter(name, raw))?;
  Ok(Some(n))
}

impl Paging {
  /// Cut one page out of `items`, keeping the unpaged count as `total`.
  pub fn apply<T>(self, name: &'static str, items: Vec<T>) -> Result<ListResponse<T>, ApiError> {
    let page = count("page", &self.page)?.unwrap_or(0);
    let total = items.len();
    let Some(per_page) = count("per_page", &self.per_page)? else {
      if page > 0 {
        return Err(ApiError::BadRequest("page requires per_page".into()));
      }
      return Ok(ListResponse { name, page, total, items });
    };
    if per_page == 0 {
      return Err(ApiError::BadRequest("per_page must be positive".into()));
    }
    let items = items
      .into_iter()
      .skip(page.saturating_mul(per_page))
      .take(per_page)
      .collect();
    Ok(ListResponse { name, page, total, items })
  }
}

/// A page of a list result, serialised with `name` as the items key.
#[derive(Debug)]
pub struct ListResponse<T> {
  pub name:  &'static str,
  pub page:  usize,
  pub total: usize,
  pub items: Vec<T>,
}

impl<T> ListResponse<T> {
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
    ListResponse {
      name:  self.name,
      page:  self.page,
      total: self.total,
      items: self.items.into_iter().map(f).collect(),
    }
  }
}

impl<T: Serialize> Serialize for ListResponse<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(3))?;
    map.serialize_entry("page", &self.page)?;
    map.serialize_entry("total", &self.total)?;
    map.serialize_entry(self.name, &self.items)?;
    map.end()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn paging(page: &str, per_page: &str) -> Paging {
    Paging { page: page.into(), per_page: per_page.into() }
  }

  #[test]
  fn unpaged_result_is_one_page() {
    let list = Paging::default().apply("persons", vec![1, 2, 3]).unwrap();
    assert_eq!(
      serde_json::to_value(&list).unwrap(),
      json!({ "page": 0, "total": 3, "persons": [1, 2, 3] })
    );
  }

  #[test]
  fn pages_are_cut_after_counting() {
    let list = paging("1", "2").apply("routeIds", vec![10, 20, 30, 40, 50]).unwrap();
    assert_eq!(list.page, 1);
    assert_eq!(list.total, 5);
    assert_eq!(list.items, vec![30, 40]);

    assert!(paging("9", "2").apply("routeIds", vec![1]).unwrap().items.is_empty());
  }

  #[test]
  fn empty_values_mean_not_given() {
    let list = paging("", "").apply("groups", vec![1, 2]).unwrap();
    assert_eq!((list.page, list.total, list.items), (0, 2, vec![1, 2]));

    let list = paging("0", "").apply("groups", vec![1, 2]).unwrap();
    assert_eq!(list.items, vec![1, 2]);
  }

  #[test]
  fn page_without_page_size_is_rejected() {
    assert!(matches!(paging("2", "").apply("x", vec![1]), Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn malformed_or_zero_page_size_is_rejected() {
    for (page, per_page) in [("0", "0"), ("0", "ten"), ("-1", "2"), ("0", "-3")] {
      let result = paging(page, per_page).apply("x", vec![1]);
      assert!(matches!(result, Err(ApiError::BadRequest(_))), "{page:?} {per_page:?}");
    }
  }
}
