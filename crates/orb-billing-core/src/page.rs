//! Cursor pagination.
//!
//! List endpoints return `{"data": [...], "pagination_metadata": {"has_more":
//! bool, "next_cursor": string | null}}`. A [`Page`] pairs one such response
//! with the parameters that produced it, so the following page can be fetched
//! by re-issuing the same request with `cursor` replaced.
//!
//! A page is in one of two states:
//!
//! - **has next**: `data` is non-empty, `next_cursor` is a string, and
//!   `has_more` is not `false`;
//! - **exhausted**: anything else, including unreadable metadata.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::field::Required;
use crate::model::{Model, Validate};
use crate::options::CodecOptions;
use crate::raw::RawBag;

crate::model! {
    /// Pagination metadata attached to every list response.
    pub struct PaginationMetadata {
        /// Whether more items exist after this page.
        required has_more / set_has_more: bool = "has_more";
        /// Opaque cursor for the next page, `null` on the last page.
        required_nullable next_cursor / set_next_cursor: String = "next_cursor";
    }
}

/// A decoded list response.
pub struct PaginatedList<T> {
    raw: RawBag,
    _item: PhantomData<fn() -> T>,
}

impl<T: Model> PaginatedList<T> {
    const DATA: Required<Vec<T>> = Required::new("data");
    const METADATA: Required<PaginationMetadata> = Required::new("pagination_metadata");

    /// The items on this page.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is missing or not an array of objects.
    pub fn data(&self) -> Result<Vec<T>> {
        Self::DATA.get(&self.raw)
    }

    /// The pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if `pagination_metadata` is missing or malformed.
    pub fn pagination_metadata(&self) -> Result<PaginationMetadata> {
        Self::METADATA.get(&self.raw)
    }

    /// Number of entries in the raw `data` array, without decoding them.
    #[must_use]
    pub fn raw_item_count(&self) -> usize {
        self.raw
            .get("data")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl<T> Clone for PaginatedList<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PaginatedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedList").field("raw", &self.raw).finish()
    }
}

impl<T: Model> Validate for PaginatedList<T> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        self.data()?.validate_with(options)?;
        self.pagination_metadata()?.validate_with(options)
    }
}

impl<T: Model> Model for PaginatedList<T> {
    fn from_raw_unchecked(raw: RawBag) -> Self {
        Self {
            raw,
            _item: PhantomData,
        }
    }

    fn raw(&self) -> &RawBag {
        &self.raw
    }

    fn raw_mut(&mut self) -> &mut RawBag {
        &mut self.raw
    }

    fn into_raw(self) -> RawBag {
        self.raw
    }
}

impl<T> Serialize for PaginatedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for PaginatedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawBag::deserialize(deserializer).map(|raw| Self {
            raw,
            _item: PhantomData,
        })
    }
}

/// List parameters that accept a pagination cursor.
pub trait CursorParams: Model {
    /// Wire name of the cursor parameter.
    const CURSOR_FIELD: &'static str = "cursor";

    /// Copy of these parameters with the cursor replaced; every other
    /// parameter is unchanged.
    #[must_use]
    fn with_cursor(&self, cursor: &str) -> Self {
        self.with_raw(Self::CURSOR_FIELD, Value::String(cursor.to_owned()))
    }
}

/// Issues one list request.
///
/// Implemented by the transport; the core only awaits a single response per
/// call and never retries.
#[async_trait]
pub trait PageFetcher: Clone + Send + Sync {
    /// Request parameters.
    type Params: CursorParams + Send + Sync;
    /// Item model.
    type Item: Model + Send + Sync;
    /// Transport error.
    type Error: From<ModelError> + Send;

    /// Fetch the page described by `params`.
    async fn fetch_page(
        &self,
        params: Self::Params,
    ) -> std::result::Result<PaginatedList<Self::Item>, Self::Error>;
}

/// One page of a list endpoint, able to fetch its successor.
pub struct Page<F: PageFetcher> {
    fetcher: F,
    params: F::Params,
    response: PaginatedList<F::Item>,
}

impl<F: PageFetcher> Page<F> {
    /// Pair a response with the fetcher and parameters that produced it.
    pub fn new(fetcher: F, params: F::Params, response: PaginatedList<F::Item>) -> Self {
        Self {
            fetcher,
            params,
            response,
        }
    }

    /// Fetch the first page for `params`.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error.
    pub async fn first(fetcher: F, params: F::Params) -> std::result::Result<Self, F::Error> {
        let response = fetcher.fetch_page(params.clone()).await?;
        Ok(Self::new(fetcher, params, response))
    }

    /// The items on this page.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be decoded.
    pub fn items(&self) -> Result<Vec<F::Item>> {
        self.response.data()
    }

    /// The decoded list response.
    pub fn response(&self) -> &PaginatedList<F::Item> {
        &self.response
    }

    /// The parameters that produced this page.
    pub fn params(&self) -> &F::Params {
        &self.params
    }

    /// Whether another page can be fetched. Never fails.
    pub fn has_next(&self) -> bool {
        self.next_cursor().is_some()
    }

    /// The parameters [`Page::next`] would send, if there is a next page.
    pub fn next_params(&self) -> Option<F::Params> {
        self.next_cursor()
            .map(|cursor| self.params.with_cursor(&cursor))
    }

    /// Fetch the following page.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PaginationExhausted`] (converted into the
    /// fetcher's error) when there is no next page, or the fetcher's error.
    pub async fn next(&self) -> std::result::Result<Self, F::Error> {
        let params = self.next_params().ok_or(ModelError::PaginationExhausted)?;
        let response = self.fetcher.fetch_page(params.clone()).await?;
        Ok(Self::new(self.fetcher.clone(), params, response))
    }

    /// Stream every item on this page and all following pages.
    ///
    /// Pages are fetched lazily, one request at a time.
    pub fn into_stream(self) -> impl Stream<Item = std::result::Result<F::Item, F::Error>> {
        stream::try_unfold(PagerState::First(self), advance)
            .map_ok(|items| stream::iter(items.into_iter().map(Ok::<F::Item, F::Error>)))
            .try_flatten()
    }

    fn next_cursor(&self) -> Option<String> {
        if self.response.raw_item_count() == 0 {
            return None;
        }
        let metadata = match self.response.pagination_metadata() {
            Ok(metadata) => metadata,
            Err(error) => {
                tracing::debug!(%error, "unreadable pagination metadata, treating page as last");
                return None;
            }
        };
        if matches!(metadata.has_more(), Ok(false)) {
            return None;
        }
        match metadata.next_cursor() {
            Ok(cursor) => cursor,
            Err(error) => {
                tracing::debug!(%error, "unreadable next_cursor, treating page as last");
                None
            }
        }
    }
}

impl<F: PageFetcher> fmt::Debug for Page<F>
where
    F::Params: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("params", &self.params)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

enum PagerState<F: PageFetcher> {
    First(Page<F>),
    After(Page<F>),
}

async fn advance<F: PageFetcher>(
    state: PagerState<F>,
) -> std::result::Result<Option<(Vec<F::Item>, PagerState<F>)>, F::Error> {
    let page = match state {
        PagerState::First(page) => page,
        PagerState::After(previous) => {
            if !previous.has_next() {
                return Ok(None);
            }
            previous.next().await?
        }
    };
    let items = page.items()?;
    Ok(Some((items, PagerState::After(page))))
}

/// Decode a list response body that is already parsed.
///
/// # Errors
///
/// Returns [`ModelError::NotAnObject`] if `value` is not a JSON object.
pub fn list_from_value<T>(value: Value) -> Result<PaginatedList<T>> {
    RawBag::from_value(value).map(|raw| PaginatedList {
        raw,
        _item: PhantomData,
    })
}
