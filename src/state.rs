use std::sync::Arc;

use crate::services::auth::{RequestTokenExtractor, TokenResolver};

#[derive(Clone)]
pub struct AppState {
    pub extractor: RequestTokenExtractor,
    pub resolver: Arc<TokenResolver>,
}

impl AppState {
    pub fn new(extractor: RequestTokenExtractor, resolver: Arc<TokenResolver>) -> Self {
        Self {
            extractor,
            resolver,
        }
    }
}
