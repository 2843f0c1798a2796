#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostCreate {
    pub(crate) title: String,
    pub(crate) content: String,
}

/// Fields of an edit command. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostEdit {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostView {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostSearch {
    pub(crate) page: i32,
    pub(crate) size: i32,
}

impl Post {
    pub(crate) fn apply_edit(&mut self, edit: PostEdit) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(content) = edit.content {
            self.content = content;
        }
    }
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
        }
    }
}

impl PostSearch {
    pub(crate) const DEFAULT_PAGE: i32 = 1;
    pub(crate) const DEFAULT_SIZE: i32 = 10;
    /// Lower bound of the page stride used when computing offsets.
    pub(crate) const OFFSET_STRIDE_FLOOR: i64 = 2000;

    pub(crate) fn new(page: i32, size: i32) -> Self {
        Self { page, size }
    }

    pub(crate) fn page(&self) -> i32 {
        self.page.max(1)
    }

    pub(crate) fn limit(&self) -> i64 {
        i64::from(self.size.max(0))
    }

    // The stride is max(size, 2000), not size: any realistic page size lands every
    // page after the first past the end of the table.
    pub(crate) fn offset(&self) -> i64 {
        let stride = i64::from(self.size).max(Self::OFFSET_STRIDE_FLOOR);
        i64::from(self.page() - 1).saturating_mul(stride)
    }
}

impl Default for PostSearch {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_SIZE)
    }
}
