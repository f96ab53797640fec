//! In-memory page model implementing [`Surface`].
//!
//! Every applied command counts as one mutation of its element. Table rows
//! carry the generation in which they were created, so a caller can tell
//! whether a row survived a pass untouched.

use std::collections::BTreeMap;

use crate::surface::{ListItem, Surface, SurfaceCommand, TableRow};
use crate::ElementId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub generation: u64,
    pub row: TableRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementState {
    pub text: String,
    pub class: String,
    pub items: Vec<ListItem>,
    pub rows: Vec<RenderedRow>,
    pub mutations: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<ElementId, ElementState>,
    generation: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.elements.get(&id).map_or("", |el| el.text.as_str())
    }

    pub fn class(&self, id: ElementId) -> &str {
        self.elements.get(&id).map_or("", |el| el.class.as_str())
    }

    pub fn items(&self, id: ElementId) -> &[ListItem] {
        self.elements.get(&id).map_or(&[][..], |el| el.items.as_slice())
    }

    pub fn rows(&self, id: ElementId) -> &[RenderedRow] {
        self.elements.get(&id).map_or(&[][..], |el| el.rows.as_slice())
    }

    pub fn mutations(&self, id: ElementId) -> u64 {
        self.elements.get(&id).map_or(0, |el| el.mutations)
    }

    pub fn total_mutations(&self) -> u64 {
        self.elements.values().map(|el| el.mutations).sum()
    }
}

impl Surface for Document {
    fn apply(&mut self, command: SurfaceCommand) {
        let element = self.elements.entry(command.element()).or_default();
        element.mutations += 1;
        match command {
            SurfaceCommand::SetText { text, .. } => element.text = text,
            SurfaceCommand::SetClass { class, .. } => element.class = class.to_string(),
            SurfaceCommand::PopulateList { items, .. } => element.items = items,
            SurfaceCommand::PopulateTable { rows, .. } => {
                self.generation += 1;
                let generation = self.generation;
                element.rows = rows
                    .into_iter()
                    .map(|row| RenderedRow { generation, row })
                    .collect();
            }
        }
    }
}
