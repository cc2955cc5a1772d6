//! Built-in reference lists

/// Passwords seen in breach corpora. Matched case-insensitively.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "123456789", "guest", "qwerty", "12345678", "111111", "12345",
    "col123456", "123123", "1234567", "1234", "1234567890", "000000", "555555", "666666",
    "123321", "654321", "7777777", "123", "d1lakiss", "777777", "110110jp", "1111", "987654321",
    "121212", "gizli", "abc123", "112233", "azerty", "159753", "1q2w3e4r", "54321", "pass@123",
    "222222", "qwertyui", "1234554321", "123qwe", "qwerty123", "password1", "administrator",
    "1111111", "123456a", "qwerty1", "password123", "passwd", "welcome", "admin", "master",
    "hello", "dragon", "monkey", "letmein", "login", "princess", "qwertyuiop", "solo",
    "passw0rd", "starwars", "shadow", "sunshine", "12345678910", "football", "iloveyou",
    "superman", "trustno1", "jesus", "mustang", "ninja", "michael", "charlie",
];

/// Dictionary words worth flagging when embedded in a password
pub const COMMON_WORDS: &[&str] = &[
    "password", "admin", "user", "login", "welcome", "hello", "world", "test", "home",
    "love", "life", "work", "time", "year", "good", "great", "best", "free", "new",
    "first", "last", "long", "little", "right", "big", "high", "different", "small",
    "large", "next", "early", "young", "important", "few", "public", "bad", "same",
    "able", "house", "service", "party", "company", "system", "program", "question",
    "government", "place", "case", "part", "group", "problem", "fact", "hand",
    "thing", "person", "woman", "man", "child", "people", "family", "community", "name",
];
