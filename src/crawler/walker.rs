//! Tree walker - category traversal orchestration
//!
//! Walks the category tree depth-first, levels 1 to 3:
//!
//! 1. Root page: collect level-1 departments
//! 2. Level 1: a page with no subcategories that lists products is scraped
//!    as a leaf; otherwise its level-2 children are visited
//! 3. Level 2: a page that lists products is scraped as a leaf (any
//!    subcategory links on it are ignored); otherwise its level-3 children
//!    are visited, or the branch is abandoned if it has none
//! 4. Level 3: scraped if it lists products, abandoned otherwise
//!
//! Levels 1 and 2 are deduplicated against the category-visited set, level 3
//! against the leaf-scraped set. A node linked from several parents is
//! processed once, under the first path that reaches it.
//!
//! Pages are loaded one at a time. A failed load below the root abandons
//! that subtree only; a failed root load or sink write ends the walk.

use crate::crawler::classifier::{classify, is_leaf, PageKind};
use crate::crawler::extractor::extract_products;
use crate::crawler::links::{collect_categories, collect_children, CategoryNode, Level};
use crate::crawler::loader::{Page, PageLoader};
use crate::crawler::SelectorSet;
use crate::output::{CategoryPath, ProductRecord, RecordSink, WalkStats};
use crate::state::TraversalContext;
use crate::url::CategoryScope;
use crate::Result;
use std::sync::Arc;

/// What a loaded category page turned out to be
enum Inspection {
    /// A listing, with its records already extracted
    Leaf(Vec<ProductRecord>),
    /// A hub, with the children to descend into
    Hub(Vec<CategoryNode>),
}

/// Drives one loader and one sink through the category tree
pub struct TreeWalker<L, S> {
    loader: L,
    sink: S,
    selectors: Arc<SelectorSet>,
    scope: CategoryScope,
    stats: WalkStats,
}

impl<L: PageLoader, S: RecordSink> TreeWalker<L, S> {
    pub fn new(loader: L, sink: S, selectors: Arc<SelectorSet>, scope: CategoryScope) -> Self {
        Self {
            loader,
            sink,
            selectors,
            scope,
            stats: WalkStats::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Walks the whole tree below `root_url`
    ///
    /// Every call starts from an empty visited state, so walking twice
    /// re-scrapes everything.
    ///
    /// # Returns
    ///
    /// * `Ok(WalkStats)` - The walk completed
    /// * `Err(WalkerError)` - The root page could not be loaded or the sink failed
    pub async fn walk(&mut self, root_url: &str) -> Result<WalkStats> {
        self.stats = WalkStats::new();
        let mut ctx = TraversalContext::new();

        tracing::info!("Loading root catalog page {}", root_url);
        let root = self.loader.load(root_url).await?;

        let departments = {
            let document = root.document();
            collect_categories(&document, &self.scope, &self.selectors)
        };
        self.stats.l1_found = departments.len() as u64;
        tracing::info!("Found L1 categories: {}", departments.len());

        for node in &departments {
            self.visit_l1(&mut ctx, node).await?;
        }

        self.stats.categories_visited = ctx.categories_visited() as u64;
        self.stats.leaves_scraped = ctx.leaves_scraped() as u64;
        self.stats.finish();

        tracing::info!(
            "Done: {} records from {} leaf listings saved to {}",
            self.stats.records_emitted,
            self.stats.leaves_scraped,
            self.sink.destination()
        );

        Ok(self.stats.clone())
    }

    async fn visit_l1(&mut self, ctx: &mut TraversalContext, node: &CategoryNode) -> Result<()> {
        tracing::info!("[L1] {} -> {}", node.title, node.url);

        if !ctx.mark_category_visited(&node.url) {
            self.skip_duplicate(node);
            return Ok(());
        }

        let Some(page) = self.load(node).await else {
            ctx.finish_without_leaf(&node.url);
            return Ok(());
        };

        let path = CategoryPath::root(&node.title);
        let inspection = {
            let document = page.document();
            let children = collect_children(&document, &self.scope, &self.selectors, Level::L2);
            if children.is_empty() && is_leaf(&document, &self.selectors) {
                Inspection::Leaf(extract_products(&document, &self.selectors, &path, &node.url))
            } else {
                Inspection::Hub(children)
            }
        };

        match inspection {
            Inspection::Leaf(records) => {
                tracing::info!("  (L1 is a leaf listing) scraping page 1");
                self.emit_leaf(ctx, &node.url, records)
            }
            Inspection::Hub(children) => {
                tracing::info!("  L2 count: {}", children.len());
                self.stats.l2_found += children.len() as u64;

                if children.is_empty() {
                    tracing::info!("  (No L2 and no products detected) skip");
                    self.stats.branches_abandoned += 1;
                }

                for child in &children {
                    self.visit_l2(ctx, &path, child).await?;
                }

                ctx.finish_without_leaf(&node.url);
                Ok(())
            }
        }
    }

    async fn visit_l2(
        &mut self,
        ctx: &mut TraversalContext,
        parent: &CategoryPath,
        node: &CategoryNode,
    ) -> Result<()> {
        tracing::info!("  [L2] {} -> {}", node.title, node.url);

        if !ctx.mark_category_visited(&node.url) {
            self.skip_duplicate(node);
            return Ok(());
        }

        let Some(page) = self.load(node).await else {
            ctx.finish_without_leaf(&node.url);
            return Ok(());
        };

        let path = parent.child(&node.title);
        let inspection = {
            let document = page.document();
            match classify(&document, &self.selectors) {
                PageKind::Leaf => {
                    Inspection::Leaf(extract_products(&document, &self.selectors, &path, &node.url))
                }
                PageKind::Hub => Inspection::Hub(collect_children(
                    &document,
                    &self.scope,
                    &self.selectors,
                    Level::L3,
                )),
                PageKind::Empty => Inspection::Hub(Vec::new()),
            }
        };

        match inspection {
            Inspection::Leaf(records) => {
                tracing::info!("    (L2 is a leaf listing) scraping page 1");
                self.emit_leaf(ctx, &node.url, records)
            }
            Inspection::Hub(children) => {
                tracing::info!("    L3 count: {}", children.len());
                self.stats.l3_found += children.len() as u64;

                if children.is_empty() {
                    tracing::info!("    (No L3 and no products detected) skip");
                    self.stats.branches_abandoned += 1;
                }

                for child in &children {
                    self.visit_l3(ctx, &path, child).await?;
                }

                ctx.finish_without_leaf(&node.url);
                Ok(())
            }
        }
    }

    async fn visit_l3(
        &mut self,
        ctx: &mut TraversalContext,
        parent: &CategoryPath,
        node: &CategoryNode,
    ) -> Result<()> {
        tracing::info!("    [L3] {} -> {}", node.title, node.url);

        // L3 nodes are potential leaves, never hubs
        if ctx.is_leaf_scraped(&node.url) {
            self.skip_duplicate(node);
            return Ok(());
        }

        ctx.begin_visit(&node.url);
        let Some(page) = self.load(node).await else {
            ctx.finish_without_leaf(&node.url);
            return Ok(());
        };

        let path = parent.child(&node.title);
        let records = {
            let document = page.document();
            is_leaf(&document, &self.selectors)
                .then(|| extract_products(&document, &self.selectors, &path, &node.url))
        };

        match records {
            Some(records) => {
                tracing::info!("      (Leaf listing) scraping page 1");
                self.emit_leaf(ctx, &node.url, records)
            }
            None => {
                // Deeper levels are not walked
                tracing::info!("      (No products detected on this L3 page)");
                self.stats.branches_abandoned += 1;
                ctx.finish_without_leaf(&node.url);
                Ok(())
            }
        }
    }

    /// Loads a node's page, absorbing the failure into the stats
    async fn load(&mut self, node: &CategoryNode) -> Option<Page> {
        match self.loader.load(&node.url).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!("Failed to load {} page {}: {}", node.level, node.url, e);
                self.stats.pages_failed += 1;
                None
            }
        }
    }

    /// Hands a leaf's records to the sink, once per URL per walk
    fn emit_leaf(
        &mut self,
        ctx: &mut TraversalContext,
        url: &str,
        records: Vec<ProductRecord>,
    ) -> Result<()> {
        if !ctx.mark_leaf_scraped(url) {
            tracing::debug!("Leaf {} already scraped, skipping", url);
            self.stats.duplicates_skipped += 1;
            return Ok(());
        }

        tracing::info!("      Products on page 1: {}", records.len());
        self.sink.append(&records)?;
        self.stats.records_emitted += records.len() as u64;
        Ok(())
    }

    fn skip_duplicate(&mut self, node: &CategoryNode) {
        tracing::debug!("{} {} already visited, skipping", node.level, node.url);
        self.stats.duplicates_skipped += 1;
    }
}
