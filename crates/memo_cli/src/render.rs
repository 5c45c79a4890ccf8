//! Plain-text rendering of board views.

use memo_core::{BoardView, MemoCard};
use std::fmt::{self, Write};

const SHORT_ID_CHARS: usize = 8;

/// Renders the whole board: header line, then one block per card.
pub fn render_board(view: &BoardView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_board(&mut out, view)?;
    Ok(out)
}

fn write_board(out: &mut impl Write, view: &BoardView) -> fmt::Result {
    writeln!(out, "MY MEMO (sort: {})", view.sort_key)?;
    if let Some(message) = view.empty_message {
        return writeln!(out, "{message}");
    }
    view.cards.iter().try_for_each(|card| write_card(&mut *out, card))
}

fn write_card(out: &mut impl Write, card: &MemoCard) -> fmt::Result {
    let star = if card.starred { '*' } else { ' ' };
    let short_id: String = card.id.to_string().chars().take(SHORT_ID_CHARS).collect();
    writeln!(
        out,
        "[{star}] {short_id}  {}  {}",
        card.display_date, card.title
    )?;
    card.content
        .lines()
        .try_for_each(|line| writeln!(out, "      {line}"))
}
