//! Archive filter grammar.
//!
//! # States
//! - None: the next segment is a year, then a month
//! - AwaitCategory: the next segment is a category slug
//! - AwaitTag: the next segment is a tag slug
//! - AwaitPage: the next segment is the page number, and the last one read
//!
//! # State Transitions
//! ```text
//! "category" (unless AwaitPage)                 → AwaitCategory
//! "tag"      (unless AwaitPage / AwaitCategory) → AwaitTag
//! "page"                                        → AwaitPage
//! slug in AwaitCategory / AwaitTag              → None
//! number in AwaitPage                           → stop
//! ```
//!
//! # Design Decisions
//! - Pure: slugs are emitted as tokens and resolved by the router
//! - Malformed numbers are dropped, never an error
//! - Years are clamped to the current year, months to 1..=12

/// Parser position between segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    None,
    AwaitCategory,
    AwaitTag,
    AwaitPage,
}

/// One recognised filter, in path order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterToken<'a> {
    Category(&'a str),
    Tag(&'a str),
    Page(u32),
    Year(i32),
    Month(u32),
}

/// Parse the segments following the archive slug.
pub fn parse_filters<'a>(segments: &[&'a str], current_year: i32) -> Vec<FilterToken<'a>> {
    let mut tokens = Vec::new();
    let mut state = ParserState::None;
    let mut year_set = false;
    let mut month_set = false;

    for &segment in segments {
        match (segment, state) {
            ("category", s) if s != ParserState::AwaitPage => {
                state = ParserState::AwaitCategory;
            }
            ("tag", s) if s != ParserState::AwaitPage && s != ParserState::AwaitCategory => {
                state = ParserState::AwaitTag;
            }
            ("page", _) => {
                state = ParserState::AwaitPage;
            }
            (slug, ParserState::AwaitCategory) => {
                tokens.push(FilterToken::Category(slug));
                state = ParserState::None;
            }
            (slug, ParserState::AwaitTag) => {
                tokens.push(FilterToken::Tag(slug));
                state = ParserState::None;
            }
            (number, ParserState::AwaitPage) => {
                if let Some(page) = number.parse::<u32>().ok().filter(|p| *p > 0) {
                    tokens.push(FilterToken::Page(page));
                }
                break;
            }
            (number, ParserState::None) if !year_set => {
                if let Ok(year) = number.parse::<i32>() {
                    tokens.push(FilterToken::Year(year.min(current_year)));
                    year_set = true;
                }
            }
            (number, ParserState::None) if !month_set => {
                if let Ok(month) = number.parse::<i32>() {
                    tokens.push(FilterToken::Month(month.clamp(1, 12) as u32));
                    month_set = true;
                }
            }
            _ => {}
        }
    }

    tokens
}
