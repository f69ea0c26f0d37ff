pub mod composer;
pub mod stylist_service;
