pub mod fact_card;
pub mod icons;
pub mod reveal_button;
