mod company;
pub use self::company::{Badge, Company, CompanyDetail, Founder, ListingEntry};
