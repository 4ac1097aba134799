//! Node type tags.
//!
//! The set is closed: composite element types carry children, token types are
//! leaves that cover a run of source text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type tag of a syntax tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    // Composite elements
    Document,
    Paragraph,
    BlockQuote,
    OrderedList,
    UnorderedList,
    ListItem,
    CodeBlock,
    CodeFence,
    CodeSpan,
    HtmlBlock,
    Emph,
    Strong,
    InlineLink,
    FullReferenceLink,
    ShortReferenceLink,
    LinkDefinition,
    LinkLabel,
    LinkDestination,
    LinkTitle,
    LinkText,
    Image,
    Autolink,
    Setext1,
    Setext2,
    SetextContent,
    Atx1,
    Atx2,
    Atx3,
    Atx4,
    Atx5,
    Atx6,
    AtxContent,

    // Tokens
    Text,
    Whitespace,
    Eol,
    BlockQuoteMarker,
    EmphDelimiter,
    Backtick,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Lt,
    Gt,
    Colon,
    ExclamationMark,
    SingleQuote,
    DoubleQuote,
    ListBullet,
    ListNumber,
    AtxHeader,
    SetextUnderline,
    CodeFenceStart,
    CodeFenceEnd,
    FenceLang,
    CodeFenceContent,
    CodeLine,
    HtmlTag,
    HtmlBlockContent,
    HardLineBreak,
    HorizontalRule,
    Url,
    EmailAutolink,
}

impl NodeType {
    /// Snake-case name, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Paragraph => "paragraph",
            Self::BlockQuote => "block_quote",
            Self::OrderedList => "ordered_list",
            Self::UnorderedList => "unordered_list",
            Self::ListItem => "list_item",
            Self::CodeBlock => "code_block",
            Self::CodeFence => "code_fence",
            Self::CodeSpan => "code_span",
            Self::HtmlBlock => "html_block",
            Self::Emph => "emph",
            Self::Strong => "strong",
            Self::InlineLink => "inline_link",
            Self::FullReferenceLink => "full_reference_link",
            Self::ShortReferenceLink => "short_reference_link",
            Self::LinkDefinition => "link_definition",
            Self::LinkLabel => "link_label",
            Self::LinkDestination => "link_destination",
            Self::LinkTitle => "link_title",
            Self::LinkText => "link_text",
            Self::Image => "image",
            Self::Autolink => "autolink",
            Self::Setext1 => "setext1",
            Self::Setext2 => "setext2",
            Self::SetextContent => "setext_content",
            Self::Atx1 => "atx1",
            Self::Atx2 => "atx2",
            Self::Atx3 => "atx3",
            Self::Atx4 => "atx4",
            Self::Atx5 => "atx5",
            Self::Atx6 => "atx6",
            Self::AtxContent => "atx_content",
            Self::Text => "text",
            Self::Whitespace => "whitespace",
            Self::Eol => "eol",
            Self::BlockQuoteMarker => "block_quote_marker",
            Self::EmphDelimiter => "emph_delimiter",
            Self::Backtick => "backtick",
            Self::LBracket => "l_bracket",
            Self::RBracket => "r_bracket",
            Self::LParen => "l_paren",
            Self::RParen => "r_paren",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Colon => "colon",
            Self::ExclamationMark => "exclamation_mark",
            Self::SingleQuote => "single_quote",
            Self::DoubleQuote => "double_quote",
            Self::ListBullet => "list_bullet",
            Self::ListNumber => "list_number",
            Self::AtxHeader => "atx_header",
            Self::SetextUnderline => "setext_underline",
            Self::CodeFenceStart => "code_fence_start",
            Self::CodeFenceEnd => "code_fence_end",
            Self::FenceLang => "fence_lang",
            Self::CodeFenceContent => "code_fence_content",
            Self::CodeLine => "code_line",
            Self::HtmlTag => "html_tag",
            Self::HtmlBlockContent => "html_block_content",
            Self::HardLineBreak => "hard_line_break",
            Self::HorizontalRule => "horizontal_rule",
            Self::Url => "url",
            Self::EmailAutolink => "email_autolink",
        }
    }

    /// Whitespace-only tokens (spaces and line ends).
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::Eol)
    }

    /// Heading level for setext and ATX heading elements.
    #[must_use]
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Setext1 | Self::Atx1 => Some(1),
            Self::Setext2 | Self::Atx2 => Some(2),
            Self::Atx3 => Some(3),
            Self::Atx4 => Some(4),
            Self::Atx5 => Some(5),
            Self::Atx6 => Some(6),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
