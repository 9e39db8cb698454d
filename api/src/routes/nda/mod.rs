pub mod nda_route;
