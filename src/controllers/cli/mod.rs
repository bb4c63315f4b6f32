pub mod render_still;
