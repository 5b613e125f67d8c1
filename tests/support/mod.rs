//! Shared helpers for the integration tests.
//!
//! `TrieBuilder` stands in for a real suffix tree builder: it inserts every
//! suffix of a document symbol by symbol, creating one node per symbol and
//! wiring suffix links, then records the document at the node spelling the
//! whole document and lets the arena back-fill the shorter suffixes.
//!
//! `init_test_tracing` installs a thread-local subscriber that captures
//! events so tests can assert on diagnostics.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use gst_node::{CharType, DocIndex, Label, NodeID, SuffixArena};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

#[derive(Debug, Default)]
pub struct TrieBuilder {
    pub tree: SuffixArena,
    pub docs: Vec<Vec<CharType>>,
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `doc` and returns its document index.
    pub fn add_document(&mut self, doc: &[CharType]) -> DocIndex {
        let index = self.docs.len() as DocIndex;
        self.docs.push(doc.to_vec());
        if let Some(full) = self.insert_suffixes(doc) {
            self.tree.add_ref(full, index, 0);
        }
        index
    }

    /// Inserts all suffixes of `doc`, shortest first so that every new
    /// node's suffix link target already exists. Returns the node spelling
    /// the whole of `doc`.
    pub fn insert_suffixes(&mut self, doc: &[CharType]) -> Option<NodeID> {
        let data: Arc<[CharType]> = Arc::from(doc);
        let root = self.tree.root();
        let mut full = None;
        for start in (0..doc.len()).rev() {
            let mut node = root;
            // Node spelling doc[start + 1..j], unknown before the first symbol.
            let mut link: Option<NodeID> = None;
            for j in start..doc.len() {
                let ch = doc[j];
                let suffix = match link {
                    None => root,
                    Some(l) => self
                        .tree
                        .transition(l, ch)
                        .expect("shorter suffix inserted first"),
                };
                node = match self.tree.transition(node, ch) {
                    Some(next) => next,
                    None => {
                        let next = self.tree.create_node();
                        self.tree
                            .connect(node, Label::new(data.clone(), j, j + 1), next)
                            .expect("label is non-empty");
                        self.tree.set_suffix(next, suffix);
                        next
                    }
                };
                link = Some(suffix);
            }
            full = Some(node);
        }
        full
    }

    /// Node spelling `pattern`, if it occurs at all.
    pub fn walk(&self, pattern: &[CharType]) -> Option<NodeID> {
        pattern
            .iter()
            .try_fold(self.tree.root(), |node, &ch| self.tree.transition(node, ch))
    }

    /// Documents containing `pattern`, found by scanning every document.
    pub fn brute_force(&self, pattern: &[CharType]) -> HashSet<DocIndex> {
        self.docs
            .iter()
            .enumerate()
            .filter(|(_, doc)| doc.windows(pattern.len()).any(|w| w == pattern))
            .map(|(i, _)| i as DocIndex)
            .collect()
    }
}

/// A recorded event with its level, target, message and fields.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
    pub fields: HashMap<String, String>,
}

/// Shared storage for captured events.
#[derive(Debug, Clone, Default)]
pub struct EventStore(Arc<Mutex<Vec<CapturedEvent>>>);

impl EventStore {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }

    /// Events whose message contains `needle`.
    pub fn find(&self, needle: &str) -> Vec<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message.contains(needle))
            .cloned()
            .collect()
    }
}

struct FieldVisitor {
    message: String,
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields
                .insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }
}

/// A `Layer` that pushes every event into an `EventStore`.
pub struct EventCaptureLayer {
    store: EventStore,
}

impl<S: Subscriber> Layer<S> for EventCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: HashMap::new(),
        };
        event.record(&mut visitor);
        let meta = event.metadata();
        self.store.0.lock().unwrap().push(CapturedEvent {
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Installs a capturing subscriber for the current thread. Hold the guard
/// for the duration of the test.
pub fn init_test_tracing() -> (EventStore, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt;

    let store = EventStore::default();
    let layer = EventCaptureLayer {
        store: store.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let guard = tracing::subscriber::set_default(subscriber);
    (store, guard)
}
