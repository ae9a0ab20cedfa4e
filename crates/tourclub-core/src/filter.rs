//! Filter composition: narrowing a base record set by optional scalar
//! parameters.
//!
//! Every endpoint that searches starts from a base set fetched by one accessor
//! and then applies an ordered list of `(parameter, accessor)` passes. A pass
//! whose raw parameter is the empty string is skipped; otherwise the parameter
//! is parsed, the accessor is invoked with it, and the running set is
//! intersected with the accessor's result. Once the running set is empty no
//! further accessor is invoked.
//!
//! All passes share one [`Deadline`]. Each accessor runs under it and an
//! expired deadline aborts the composition with [`Error::Timeout`].

use std::{collections::HashSet, future::Future, hash::Hash, time::Duration};

use chrono::NaiveDate;
use tokio::time::Instant;

use crate::{Error, Result};

// ─── Deadline ────────────────────────────────────────────────────────────────

/// The instant by which a request's store work must be finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
  pub fn after(timeout: Duration) -> Self { Self(Instant::now() + timeout) }

  pub fn at(instant: Instant) -> Self { Self(instant) }

  pub fn expired(&self) -> bool { Instant::now() >= self.0 }

  /// Fail with [`Error::Timeout`] once the deadline has passed.
  pub fn check(&self) -> Result<()> {
    if self.expired() { Err(Error::Timeout) } else { Ok(()) }
  }

  /// Drive `work` to completion unless the deadline passes first.
  pub async fn run<T, E, F>(&self, work: F) -> Result<T, E>
  where
    E: From<Error>,
    F: Future<Output = Result<T, E>>,
  {
    self.check()?;
    tokio::time::timeout_at(self.0, work)
      .await
      .map_err(|_| E::from(Error::Timeout))?
  }
}

// ─── Intersection ────────────────────────────────────────────────────────────

/// Keep the records of `current` that also occur in `candidates`, comparing
/// whole records. The order of `current` is preserved.
pub fn intersect<T>(current: Vec<T>, candidates: Vec<T>) -> Vec<T>
where
  T: Eq + Hash,
{
  let keep: HashSet<T> = candidates.into_iter().collect();
  current.into_iter().filter(|r| keep.contains(r)).collect()
}

// ─── Passes ──────────────────────────────────────────────────────────────────

/// One narrowing pass keyed by an integer request parameter.
///
/// `name` is only used for error reporting.
pub async fn apply_filter<T, E, F, Fut>(
  name: &'static str,
  raw: &str,
  current: Vec<T>,
  deadline: Deadline,
  accessor: F,
) -> Result<Vec<T>, E>
where
  T: Eq + Hash,
  E: From<Error>,
  F: FnOnce(i64) -> Fut,
  Fut: Future<Output = Result<Vec<T>, E>>,
{
  if current.is_empty() || raw.is_empty() {
    return Ok(current);
  }
  let value = parse_int(name, raw)?;
  deadline.check()?;
  tracing::trace!(filter = name, value, before = current.len(), "narrowing");
  let candidates = deadline.run(accessor(value)).await?;
  Ok(intersect(current, candidates))
}

/// A narrowing pass whose candidate set is not keyed by a single integer
/// parameter. The caller decides whether the pass was requested; `fetch` is
/// not invoked when `current` is already empty.
pub async fn narrow_with<T, E, F, Fut>(
  current: Vec<T>,
  deadline: Deadline,
  fetch: F,
) -> Result<Vec<T>, E>
where
  T: Eq + Hash,
  E: From<Error>,
  F: FnOnce() -> Fut,
  Fut: Future<Output = Result<Vec<T>, E>>,
{
  if current.is_empty() {
    return Ok(current);
  }
  deadline.check()?;
  let candidates = deadline.run(fetch()).await?;
  Ok(intersect(current, candidates))
}

// ─── Parameter parsing ───────────────────────────────────────────────────────

pub fn parse_int(name: &'static str, raw: &str) -> Result<i64> {
  raw.parse().map_err(|_| Error::parameter(name, raw))
}

/// Parse an optional integer parameter; the empty string means absent.
pub fn optional_int(name: &'static str, raw: &str) -> Result<Option<i64>> {
  if raw.is_empty() { Ok(None) } else { parse_int(name, raw).map(Some) }
}

/// Parse an optional `YYYY-MM-DD` parameter; the empty string means absent.
pub fn optional_date(name: &'static str, raw: &str) -> Result<Option<NaiveDate>> {
  if raw.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map(Some)
    .map_err(|_| Error::parameter(name, raw))
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;

  type Sets = Vec<(&'static str, Vec<u32>)>;

  fn deadline() -> Deadline { Deadline::after(Duration::from_secs(60)) }

  /// An accessor returning fixed sets and counting its invocations.
  fn counting(
    calls: &Arc<AtomicUsize>,
    result: Vec<u32>,
  ) -> impl FnOnce(i64) -> std::future::Ready<Result<Vec<u32>>> {
    let calls = calls.clone();
    move |_| {
      calls.fetch_add(1, Ordering::SeqCst);
      std::future::ready(Ok(result))
    }
  }

  async fn compose(base: Vec<u32>, passes: &Sets) -> Vec<u32> {
    let mut current = base;
    for (raw, set) in passes {
      let set = set.clone();
      current = apply_filter("p", raw, current, deadline(), move |_| async move {
        Ok::<_, Error>(set)
      })
      .await
      .unwrap();
    }
    current
  }

  #[tokio::test]
  async fn tourists_by_section_and_sex() {
    // base {P1,P2,P3}; section=2 -> {P1,P2}; sex=1 -> {P2,P3}
    let result = compose(
      vec![1, 2, 3],
      &vec![("2", vec![1, 2]), ("", vec![]), ("1", vec![2, 3])],
    )
    .await;
    assert_eq!(result, vec![2]);
  }

  #[tokio::test]
  async fn order_of_passes_does_not_change_the_result() {
    let passes: Sets = vec![
      ("1", vec![1, 2, 3, 5, 8]),
      ("2", vec![2, 3, 5, 7]),
      ("3", vec![5, 3, 11]),
    ];
    let expected = compose(vec![1, 2, 3, 4, 5, 6, 7, 8], &passes).await;
    assert_eq!(expected, vec![3, 5]);

    for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
      let reordered: Sets = order.iter().map(|&i| passes[i].clone()).collect();
      let mut got = compose(vec![1, 2, 3, 4, 5, 6, 7, 8], &reordered).await;
      got.sort();
      assert_eq!(got, expected, "order {order:?}");
    }
  }

  #[tokio::test]
  async fn empty_parameter_leaves_result_untouched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let result = apply_filter("p", "", vec![1, 2, 3], deadline(), counting(&calls, vec![]))
      .await
      .unwrap();
    assert_eq!(result, vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn empty_result_short_circuits_remaining_passes() {
    let calls = Arc::new(AtomicUsize::new(0));

    let mut current = vec![1, 2];
    current = apply_filter("a", "1", current, deadline(), counting(&calls, vec![9]))
      .await
      .unwrap();
    assert!(current.is_empty());

    current = apply_filter("b", "2", current, deadline(), counting(&calls, vec![1]))
      .await
      .unwrap();
    current = narrow_with(current, deadline(), || async {
      calls.fetch_add(1, Ordering::SeqCst);
      Ok::<_, Error>(vec![1])
    })
    .await
    .unwrap();

    assert!(current.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn malformed_parameter_is_rejected_before_the_accessor() {
    let calls = Arc::new(AtomicUsize::new(0));
    let err = apply_filter("section", "two", vec![1], deadline(), counting(&calls, vec![1]))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Parameter { name: "section", ref value } if value == "two"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn accessor_error_aborts_the_composition() {
    let err = apply_filter("p", "1", vec![1], deadline(), |_| async {
      Err::<Vec<u32>, _>(Error::UnknownAttribute(7))
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(7)));
  }

  #[tokio::test]
  async fn intersection_keeps_base_order() {
    assert_eq!(intersect(vec![5, 1, 4, 2], vec![2, 5, 4]), vec![5, 4, 2]);
  }

  #[tokio::test(start_paused = true)]
  async fn slow_accessor_times_out() {
    let short = Deadline::after(Duration::from_secs(1));
    let err = apply_filter("p", "1", vec![1], short, |_| async {
      tokio::time::sleep(Duration::from_secs(10)).await;
      Ok::<_, Error>(vec![1])
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Timeout));
  }

  #[tokio::test(start_paused = true)]
  async fn expired_deadline_skips_the_accessor() {
    let calls = Arc::new(AtomicUsize::new(0));
    let past = Deadline::after(Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(past.expired());

    let err = apply_filter("p", "1", vec![1], past, counting(&calls, vec![1]))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Timeout));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn expired_deadline_skips_the_fetch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let past = Deadline::after(Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = narrow_with(vec![1], past, || async {
      calls.fetch_add(1, Ordering::SeqCst);
      Ok::<_, Error>(vec![1])
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Timeout));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn optional_parameters() {
    assert_eq!(optional_int("n", "").unwrap(), None);
    assert_eq!(optional_int("n", "-4").unwrap(), Some(-4));
    assert!(optional_int("n", "4x").is_err());
    assert_eq!(
      optional_date("d", "2024-01-31").unwrap(),
      NaiveDate::from_ymd_opt(2024, 1, 31)
    );
    assert!(optional_date("d", "31.01.2024").is_err());
  }
}
