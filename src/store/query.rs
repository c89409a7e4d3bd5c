use crate::model::TaskJson;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderBound {
    AtMost(i64),
    After(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sort {
    OrderAscending,
    OrderDescending,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    Any,
    /// Tag present and non-empty.
    Tagged,
    Exactly(String),
}

/// Conjunction of field filters over records, plus optional sort and limit.
#[derive(Clone, Debug, Default)]
pub struct RecordQuery {
    task_id: Option<String>,
    name: Option<String>,
    project_id: Option<String>,
    variant: Option<String>,
    task_name: Option<String>,
    version_id: Option<String>,
    build_id: Option<String>,
    is_patch: Option<bool>,
    tag: TagFilter,
    order: Option<OrderBound>,
    revision_prefix: Option<String>,
    sort: Option<Sort>,
    limit: Option<usize>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_id(mut self, task_id: &str) -> Self {
        self.task_id = Some(task_id.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn project(mut self, project_id: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self
    }

    pub fn variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    pub fn task_name(mut self, task_name: &str) -> Self {
        self.task_name = Some(task_name.to_string());
        self
    }

    pub fn version(mut self, version_id: &str) -> Self {
        self.version_id = Some(version_id.to_string());
        self
    }

    pub fn build(mut self, build_id: &str) -> Self {
        self.build_id = Some(build_id.to_string());
        self
    }

    pub fn mainline_only(mut self) -> Self {
        self.is_patch = Some(false);
        self
    }

    pub fn tagged(mut self) -> Self {
        self.tag = TagFilter::Tagged;
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = TagFilter::Exactly(tag.to_string());
        self
    }

    pub fn order(mut self, bound: OrderBound) -> Self {
        self.order = Some(bound);
        self
    }

    /// Match revisions starting with `prefix`, ignoring ASCII case.
    pub fn revision_prefix(mut self, prefix: &str) -> Self {
        self.revision_prefix = Some(prefix.to_ascii_lowercase());
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, r: &TaskJson) -> bool {
        fn eq(want: &Option<String>, have: &str) -> bool {
            want.as_deref().is_none_or(|w| w == have)
        }

        if !(eq(&self.task_id, &r.task_id)
            && eq(&self.name, &r.name)
            && eq(&self.project_id, &r.project_id)
            && eq(&self.variant, &r.variant)
            && eq(&self.task_name, &r.task_name)
            && eq(&self.version_id, &r.version_id)
            && eq(&self.build_id, &r.build_id))
        {
            return false;
        }
        if self.is_patch.is_some_and(|p| p != r.is_patch) {
            return false;
        }
        let tag_ok = match &self.tag {
            TagFilter::Any => true,
            TagFilter::Tagged => r.has_tag(),
            TagFilter::Exactly(t) => r.tag.as_deref() == Some(t.as_str()),
        };
        if !tag_ok {
            return false;
        }
        let order_ok = match self.order {
            None => true,
            Some(OrderBound::AtMost(o)) => r.order <= o,
            Some(OrderBound::After(o)) => r.order > o,
        };
        if !order_ok {
            return false;
        }
        if let Some(prefix) = &self.revision_prefix
            && !r.revision.to_ascii_lowercase().starts_with(prefix.as_str())
        {
            return false;
        }
        true
    }

    /// Filter, sort and truncate `records`, preserving input order for ties.
    pub(crate) fn apply<'a>(&self, records: impl Iterator<Item = &'a TaskJson>) -> Vec<TaskJson> {
        let mut out: Vec<TaskJson> = records.filter(|r| self.matches(r)).cloned().collect();
        match self.sort {
            Some(Sort::OrderAscending) => out.sort_by_key(|r| r.order),
            Some(Sort::OrderDescending) => out.sort_by_key(|r| std::cmp::Reverse(r.order)),
            None => {}
        }
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}
