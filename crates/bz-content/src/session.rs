//! Editing session
//!
//! One open document: its config, attribute filter, identifier generator and
//! retained-id allocator. Loading a document reseeds the allocator from the
//! loaded content; pastes are filtered and rewritten before insertion.

use crate::builders::ElementBuilder;
use crate::clipboard::{ClipboardRewriter, RewriteReport};
use crate::config::SessionConfig;
use crate::filter::AttributeFilter;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::retained::RetainedAllocator;
use crate::Result;
use bz_dom::{DomTree, MutationRecord, NodeId};
use bz_html::{HtmlParser, HtmlSerializer};

pub struct EditingSession<G: IdGenerator = UuidGenerator> {
    config: SessionConfig,
    filter: AttributeFilter,
    generator: G,
    allocator: RetainedAllocator,
    parser: HtmlParser,
    serializer: HtmlSerializer,
}

impl EditingSession<UuidGenerator> {
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_generator(config, UuidGenerator)
    }
}

impl<G: IdGenerator> EditingSession<G> {
    pub fn with_generator(config: SessionConfig, generator: G) -> Result<Self> {
        let allocator = RetainedAllocator::new(&config.page_id)?;
        let filter = AttributeFilter::with_extra(&config.extra_attributes);
        Ok(Self {
            config,
            filter,
            generator,
            allocator,
            parser: HtmlParser::new(),
            serializer: HtmlSerializer::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn filter(&self) -> &AttributeFilter {
        &self.filter
    }

    pub fn allocator(&self) -> &RetainedAllocator {
        &self.allocator
    }

    /// Parse and filter `html`, then reseed the allocator from it
    ///
    /// The returned document is observed: attribute and child-list edits made
    /// through its API are recorded and can be fed back with
    /// [`sync`](Self::sync).
    pub fn load(&mut self, html: &str) -> Result<DomTree> {
        let mut document = self.parser.parse_fragment(html)?;
        self.filter.filter_tree(&mut document);
        self.allocator.load(&document);
        document.observe();

        tracing::info!(
            page_id = %self.config.page_id,
            nodes = document.len(),
            next_retained = self.allocator.peek(),
            "loaded document"
        );
        Ok(document)
    }

    /// Parse, filter and rewrite a paste payload
    pub fn paste(&mut self, html: &str) -> Result<(DomTree, RewriteReport)> {
        let mut fragment = self.parser.parse_fragment(html)?;
        self.filter.filter_tree(&mut fragment);

        let mut rewriter = ClipboardRewriter::new(&self.generator);
        if self.config.reissue_retained {
            rewriter = rewriter.reissue_retained(&mut self.allocator);
        }
        Ok(rewriter.rewrite(&fragment))
    }

    /// Insert a fragment's top-level nodes under `parent` and sync
    pub fn insert(
        &mut self,
        document: &mut DomTree,
        parent: NodeId,
        fragment: &DomTree,
    ) -> Result<Vec<NodeId>> {
        let inserted = document.import_children(fragment, fragment.root(), parent)?;
        self.sync(document);
        Ok(inserted)
    }

    /// Feed change notifications delivered by the host to the allocator
    pub fn notify(&mut self, document: &DomTree, records: &[MutationRecord]) {
        for record in records {
            self.allocator.observe(document, record);
        }
    }

    /// Drain the document's pending records into the allocator
    pub fn sync(&mut self, document: &mut DomTree) {
        let records = document.take_records();
        self.notify(document, &records);
    }

    pub fn next_retained_id(&mut self) -> String {
        self.allocator.next_id()
    }

    /// Builder for new interactive elements
    pub fn builder(&mut self) -> ElementBuilder<'_, G> {
        ElementBuilder::new(&self.generator, &mut self.allocator)
    }

    /// Filter a copy of `document` and serialize it
    pub fn export(&self, document: &DomTree) -> String {
        let mut copy = document.detached_clone();
        self.filter.filter_tree(&mut copy);
        self.serializer.serialize_inner(&copy, copy.root())
    }
}
