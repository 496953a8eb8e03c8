use serde::Serialize;

/// Affordances a rendered card exposes to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Like,
    Dislike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    Caption,
}

/// Declarative view tree handed to the client renderer as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum View {
    Card { children: Vec<View> },
    Row { children: Vec<View> },
    Image { uri: String },
    Text { style: TextStyle, content: String },
    Button { label: String, control: Control },
}

impl View {
    pub fn children(&self) -> &[View] {
        match self {
            View::Card { children } | View::Row { children } => children,
            _ => &[],
        }
    }

    /// Depth-first walk, parent before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a View)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    pub fn text_with_style(&self, wanted: TextStyle) -> Option<&str> {
        let mut found = None;
        self.walk(&mut |node| {
            if let View::Text { style, content } = node {
                if found.is_none() && *style == wanted {
                    found = Some(content.as_str());
                }
            }
        });
        found
    }

    pub fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::new();
        self.walk(&mut |node| {
            if let View::Button { control, .. } = node {
                controls.push(*control);
            }
        });
        controls
    }
}
