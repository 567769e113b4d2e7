//! Message section: one cell with the text and its author.

use crate::model::item::DatedItem;
use crate::model::message::Message;
use crate::presentation::{
    CellSize, LayoutContext, PresentationStrategy, RenderedCell, StrategyKind,
};

#[derive(Debug, Clone, Default)]
pub struct MessageStrategy {
    message: Option<Message>,
}

impl MessageStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationStrategy for MessageStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Message
    }

    fn bind(&mut self, item: DatedItem<'_>) {
        self.message = match item {
            DatedItem::Message(message) => Some(message.clone()),
            _ => None,
        };
    }

    fn item_count(&self) -> usize {
        1
    }

    fn size_for(&self, index: usize, context: &LayoutContext) -> CellSize {
        let Some(message) = self.message.as_ref() else {
            return CellSize::ZERO;
        };
        if index >= self.item_count() {
            return CellSize::ZERO;
        }
        let width = context.container_width;
        // Author line sits under the message text.
        let height = context.metrics.text_height(&message.text, width) + context.metrics.line_height;
        CellSize::new(width, height)
    }

    fn render(&self, index: usize) -> RenderedCell {
        match (index, self.message.as_ref()) {
            (0, Some(message)) => RenderedCell::Message {
                text: message.text.clone(),
                author: message.user.name.clone(),
            },
            _ => RenderedCell::Empty,
        }
    }
}
