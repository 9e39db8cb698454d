pub mod summarize_route;
