/// HS256 secret used to sign bearer tokens in tests.
pub static TEST_JWT_SECRET: &str = "sharefood-test-secret";

/// URL returned by the mock image host upload endpoint.
pub static TEST_PICTURE_URL: &str = "https://images.example.com/donations/picture.jpg";
