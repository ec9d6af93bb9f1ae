//! Request fixtures shared by the benchmarks.
//!
//! Fixtures are inline byte strings rather than resource files so that their
//! `\r\n` line endings survive checkouts that rewrite line endings.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
}

impl TestCase {
    pub const fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file }
    }

    pub const fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub const fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Large, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn content(&self) -> &'static [u8] {
        self.file.content
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static [u8],
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static [u8]) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestGroup {
    Small,
    Large,
}

impl TestGroup {
    pub const ALL: [TestGroup; 2] = [TestGroup::Small, TestGroup::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            TestGroup::Small => "small",
            TestGroup::Large => "large",
        }
    }
}

pub static GET_SMALL: TestFile = TestFile::new("get_small", b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n");

pub static GET_LARGE: TestFile = TestFile::new(
    "get_large",
    b"GET /search?q=nano%20http&lang=en&page=2&sort=desc HTTP/1.1\r\n\
      Host: localhost:8080\r\n\
      User-Agent: Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0\r\n\
      Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8\r\n\
      Accept-Language: en-US,en;q=0.5\r\n\
      Accept-Encoding: gzip, deflate, br\r\n\
      Referer: http://localhost:8080/\r\n\
      Connection: close\r\n\
      Cookie: session=3f2a9c1b7d; theme=dark; tz=Europe%2FParis\r\n\
      Upgrade-Insecure-Requests: 1\r\n\
      Sec-Fetch-Dest: document\r\n\
      Sec-Fetch-Mode: navigate\r\n\
      Sec-Fetch-Site: same-origin\r\n\
      Cache-Control: max-age=0\r\n\
      \r\n",
);

pub static POST_FORM: TestFile = TestFile::new(
    "post_form",
    b"POST /user?source=bench HTTP/1.1\r\n\
      Host: localhost\r\n\
      Content-Type: application/x-www-form-urlencoded\r\n\
      \r\n\
      name=Ann+Lee&zip=75001&city=Paris&note=caf%C3%A9%20au%20lait",
);

pub static POST_JSON: TestFile = TestFile::new(
    "post_json",
    b"POST /user HTTP/1.1\r\n\
      Host: localhost\r\n\
      Content-Type: application/json\r\n\
      \r\n\
      {\"name\":\"Ann Lee\",\"zip\":\"75001\",\"tags\":[\"a\",\"b\",\"c\"],\"active\":true}",
);

pub static POST_MULTIPART: TestFile = TestFile::new(
    "post_multipart",
    b"POST /upload HTTP/1.1\r\n\
      Host: localhost\r\n\
      Content-Type: multipart/form-data; boundary=----nano\r\n\
      \r\n\
      ------nano\r\n\
      Content-Disposition: form-data; name=\"title\"\r\n\
      \r\n\
      holiday\r\n\
      ------nano\r\n\
      Content-Disposition: form-data; name=\"photo\"; filename=\"beach.txt\"\r\n\
      Content-Type: text/plain\r\n\
      \r\n\
      sand, sea and sun\r\n\
      ------nano--\r\n",
);
