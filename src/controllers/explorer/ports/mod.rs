pub mod render_requester;
