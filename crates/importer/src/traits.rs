use crate::Result;
use scraper::ElementRef;

/// Retrieves raw markup for a listing page.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// One way of pulling a text field out of a listing card. Fields are read by
/// trying strategies in order until one returns a value.
pub trait FieldStrategy: Send + Sync {
    fn extract(&self, card: ElementRef<'_>) -> Option<String>;
}

pub type FieldChain = Vec<Box<dyn FieldStrategy>>;

/// First non-empty value produced by the chain.
pub fn first_match(chain: &[Box<dyn FieldStrategy>], card: ElementRef<'_>) -> Option<String> {
    chain
        .iter()
        .filter_map(|strategy| strategy.extract(card))
        .find(|value| !value.trim().is_empty())
}
