use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{
    api::{Comment, Page, Post, Topic, User},
    Entity,
};

/// Cache shared with the async action layer; never hold the lock across an
/// `.await`
pub type SharedCache = Arc<Mutex<QueryCache>>;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum QueryKey<K, Q> {
    /// `[name, key]`
    Item(K),

    /// `[name]`
    List,

    /// `[plural, query]`
    Page(Q),
}

/// What is stored under a `QueryKey`. The variant always matches the key's.
///
/// Every level is behind an `Arc`, so that an entry left untouched by a
/// mutation stays pointer-equal to what observers already hold.
#[derive(Clone, Debug)]
pub enum CacheEntry<E> {
    Item(Arc<E>),
    List(Arc<Vec<Arc<E>>>),
    Page(Arc<Page<Arc<E>>>),
}

type Key<E> = QueryKey<<E as Entity>::Key, <E as Entity>::Query>;

#[derive(Clone, Debug)]
pub struct EntityCache<E: Entity> {
    entries: HashMap<Key<E>, CacheEntry<E>>,
}

impl<E: Entity> Default for EntityCache<E> {
    fn default() -> EntityCache<E> {
        EntityCache {
            entries: HashMap::new(),
        }
    }
}

impl<E: Entity> EntityCache<E> {
    pub fn new() -> EntityCache<E> {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Key<E>) -> Option<&CacheEntry<E>> {
        self.entries.get(key)
    }

    pub fn insert_item(&mut self, e: E) -> Arc<E> {
        let e = Arc::new(e);
        self.entries
            .insert(QueryKey::Item(e.key()), CacheEntry::Item(e.clone()));
        e
    }

    pub fn insert_list(&mut self, items: Vec<E>) -> Arc<Vec<Arc<E>>> {
        let list = Arc::new(items.into_iter().map(Arc::new).collect::<Vec<_>>());
        self.entries
            .insert(QueryKey::List, CacheEntry::List(list.clone()));
        list
    }

    pub fn insert_page(&mut self, query: E::Query, page: Page<E>) -> Arc<Page<Arc<E>>> {
        let page = Arc::new(Page {
            items: page.items.into_iter().map(Arc::new).collect(),
            count: page.count,
        });
        self.entries
            .insert(QueryKey::Page(query), CacheEntry::Page(page.clone()));
        page
    }

    pub fn item(&self, key: &E::Key) -> Option<&Arc<E>> {
        match self.entries.get(&QueryKey::Item(key.clone())) {
            Some(CacheEntry::Item(e)) => Some(e),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&Arc<Vec<Arc<E>>>> {
        match self.entries.get(&QueryKey::List) {
            Some(CacheEntry::List(l)) => Some(l),
            _ => None,
        }
    }

    pub fn page(&self, query: &E::Query) -> Option<&Arc<Page<Arc<E>>>> {
        match self.entries.get(&QueryKey::Page(query.clone())) {
            Some(CacheEntry::Page(p)) => Some(p),
            _ => None,
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = (&E::Query, &Arc<Page<Arc<E>>>)> {
        self.entries.iter().filter_map(|(k, v)| match (k, v) {
            (QueryKey::Page(q), CacheEntry::Page(p)) => Some((q, p)),
            _ => None,
        })
    }

    pub fn remove(&mut self, key: &Key<E>) -> Option<CacheEntry<E>> {
        self.entries.remove(key)
    }

    /// Drops every cached page whose query matches, returning how many were
    /// dropped
    pub fn invalidate_pages<F>(&mut self, matches: F) -> usize
    where
        F: Fn(&E::Query) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|k, _| match k {
            QueryKey::Page(q) => !matches(q),
            _ => true,
        });
        before - self.entries.len()
    }

    pub fn invalidate_all_pages(&mut self) -> usize {
        self.invalidate_pages(|_| true)
    }

    /// Replaces every cached representation of the entity `key` with
    /// `transform(old)`, returning the number of entries rewritten.
    ///
    /// Entries that do not contain the entity, and elements of rewritten
    /// lists that are other entities, keep their `Arc`.
    pub fn apply_mutation<F>(&mut self, key: &E::Key, transform: F) -> usize
    where
        F: Fn(&E) -> E,
    {
        let mut touched = 0;
        for (k, entry) in self.entries.iter_mut() {
            let updated = match (k, &*entry) {
                (QueryKey::Item(k), CacheEntry::Item(e)) if k == key => {
                    Some(CacheEntry::Item(Arc::new(transform(e))))
                }
                (QueryKey::List, CacheEntry::List(l)) => {
                    map_matching(l, key, &transform).map(|l| CacheEntry::List(Arc::new(l)))
                }
                (QueryKey::Page(_), CacheEntry::Page(p)) => {
                    map_matching(&p.items, key, &transform).map(|items| {
                        CacheEntry::Page(Arc::new(Page {
                            items,
                            count: p.count,
                        }))
                    })
                }
                _ => None,
            };
            if let Some(updated) = updated {
                *entry = updated;
                touched += 1;
            }
        }
        touched
    }
}

fn map_matching<E, F>(items: &[Arc<E>], key: &E::Key, transform: &F) -> Option<Vec<Arc<E>>>
where
    E: Entity,
    F: Fn(&E) -> E,
{
    if !items.iter().any(|e| e.key() == *key) {
        return None;
    }
    Some(
        items
            .iter()
            .map(|e| match e.key() == *key {
                true => Arc::new(transform(e)),
                false => e.clone(),
            })
            .collect(),
    )
}

/// All the client-side cached query results
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    pub comments: EntityCache<Comment>,
    pub posts: EntityCache<Post>,
    pub topics: EntityCache<Topic>,
    pub users: EntityCache<User>,
}

impl QueryCache {
    pub fn new() -> QueryCache {
        Self::default()
    }

    pub fn shared() -> SharedCache {
        Arc::new(Mutex::new(Self::default()))
    }

    pub fn of<E: Entity>(&self) -> &EntityCache<E> {
        E::cache(self)
    }

    pub fn of_mut<E: Entity>(&mut self) -> &mut EntityCache<E> {
        E::cache_mut(self)
    }

    /// Forgets everything, eg. when a change may have touched any entity
    pub fn clear(&mut self) {
        *self = QueryCache::default();
    }
}

/// Reflects a server-confirmed mutation of entity `key` in every cached
/// query of its family. A cache miss is not an error.
pub fn apply_mutation<E, F>(cache: &mut QueryCache, key: &E::Key, transform: F) -> usize
where
    E: Entity,
    F: Fn(&E) -> E,
{
    let touched = cache.of_mut::<E>().apply_mutation(key, transform);
    tracing::debug!(
        entity = E::NAME,
        key = ?key,
        touched,
        "applied optimistic mutation"
    );
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{CommentId, CommentSort, ListCommentsRequest, PostId, Time, UserId, Vote},
        mutation,
    };

    fn comment(id: i64, post: i64) -> Comment {
        let date = Time::from_timestamp(1_700_000_000 + id, 0).unwrap();
        Comment {
            id: CommentId(id),
            post_id: PostId(post),
            parent_id: None,
            content: format!("comment {id}"),
            summary: format!("comment {id}"),
            path: id.to_string(),
            score: 10,
            my_vote: Vote::Neutral,
            is_deleted: false,
            deleted_at: None,
            no_of_replies: 0,
            created_at: date,
            updated_at: date,
            user_id: UserId(1),
            username: String::from("alice"),
            topic_name: String::from("General"),
            post_title: None,
            has_long_content: false,
        }
    }

    fn query(page: u32) -> ListCommentsRequest {
        ListCommentsRequest {
            page,
            ..ListCommentsRequest::default()
        }
    }

    fn populated() -> QueryCache {
        let mut cache = QueryCache::new();
        cache.comments.insert_item(comment(1, 1));
        cache.comments.insert_item(comment(2, 1));
        cache
            .comments
            .insert_list(vec![comment(1, 1), comment(2, 1), comment(3, 2)]);
        cache.comments.insert_page(
            query(1),
            Page {
                items: vec![comment(1, 1), comment(2, 1)],
                count: 4,
            },
        );
        cache.comments.insert_page(
            query(2),
            Page {
                items: vec![comment(3, 2), comment(4, 2)],
                count: 4,
            },
        );
        cache.comments.insert_page(
            ListCommentsRequest::thread(PostId(1), CommentSort::Score),
            Page {
                items: vec![comment(2, 1), comment(1, 1)],
                count: 2,
            },
        );
        cache
    }

    fn snapshot(cache: &QueryCache) -> Vec<(Key<Comment>, CacheEntry<Comment>)> {
        cache
            .comments
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn same_entry<E>(a: &CacheEntry<E>, b: &CacheEntry<E>) -> bool {
        match (a, b) {
            (CacheEntry::Item(a), CacheEntry::Item(b)) => Arc::ptr_eq(a, b),
            (CacheEntry::List(a), CacheEntry::List(b)) => Arc::ptr_eq(a, b),
            (CacheEntry::Page(a), CacheEntry::Page(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    #[test]
    fn updates_every_representation() {
        let mut cache = populated();
        let touched =
            apply_mutation::<Comment, _>(
                &mut cache,
                &CommentId(1),
                mutation::vote::<Comment>(Vote::Up),
            );
        // item, flat list, page 1, thread page
        assert_eq!(touched, 4);

        let c = &cache.comments;
        assert_eq!(c.item(&CommentId(1)).unwrap().score, 11);
        assert_eq!(c.item(&CommentId(1)).unwrap().my_vote, Vote::Up);
        assert_eq!(c.item(&CommentId(2)).unwrap().score, 10);
        assert_eq!(c.list().unwrap()[0].score, 11);
        assert_eq!(c.page(&query(1)).unwrap().items[0].score, 11);
        let thread = c
            .page(&ListCommentsRequest::thread(PostId(1), CommentSort::Score))
            .unwrap();
        assert_eq!(thread.items[1].score, 11);
        assert_eq!(thread.items[1].my_vote, Vote::Up);
    }

    #[test]
    fn untouched_entries_keep_identity() {
        let mut cache = populated();
        let before = snapshot(&cache);
        apply_mutation::<Comment, _>(&mut cache, &CommentId(3), mutation::delete::<Comment>());

        for (k, old) in before {
            let new = cache.comments.get(&k).unwrap();
            let contains_3 = match old {
                CacheEntry::Item(ref e) => e.id == CommentId(3),
                CacheEntry::List(ref l) => l.iter().any(|e| e.id == CommentId(3)),
                CacheEntry::Page(ref p) => p.items.iter().any(|e| e.id == CommentId(3)),
            };
            assert_eq!(same_entry(&old, new), !contains_3, "entry {k:?}");
        }
    }

    #[test]
    fn siblings_and_count_are_preserved() {
        let mut cache = populated();
        let old_page = cache.comments.page(&query(2)).unwrap().clone();
        apply_mutation::<Comment, _>(&mut cache, &CommentId(4), mutation::delete::<Comment>());
        let new_page = cache.comments.page(&query(2)).unwrap();
        assert!(!Arc::ptr_eq(&old_page, new_page));
        assert_eq!(new_page.count, 4);
        assert!(Arc::ptr_eq(&old_page.items[0], &new_page.items[0]));
        assert!(!old_page.items[1].is_deleted);
        assert!(new_page.items[1].is_deleted);
    }

    #[test]
    fn missing_entity_is_a_no_op() {
        let mut cache = populated();
        let before = snapshot(&cache);
        let touched =
            apply_mutation::<Comment, _>(
                &mut cache,
                &CommentId(42),
                mutation::vote::<Comment>(Vote::Down),
            );
        assert_eq!(touched, 0);
        for (k, old) in before {
            assert!(same_entry(&old, cache.comments.get(&k).unwrap()));
        }

        let mut empty = QueryCache::new();
        assert_eq!(
            apply_mutation::<Post, _>(&mut empty, &PostId(1), mutation::pin_comment(None)),
            0
        );
        assert!(empty.posts.is_empty());
    }

    #[test]
    fn idempotent_transforms_apply_once() {
        let mut once = populated();
        let mut twice = populated();
        apply_mutation::<Comment, _>(
            &mut once,
            &CommentId(2),
            mutation::vote::<Comment>(Vote::Down),
        );
        apply_mutation::<Comment, _>(
            &mut twice,
            &CommentId(2),
            mutation::vote::<Comment>(Vote::Down),
        );
        apply_mutation::<Comment, _>(
            &mut twice,
            &CommentId(2),
            mutation::vote::<Comment>(Vote::Down),
        );
        for (k, entry) in once.comments.entries.iter() {
            let other = twice.comments.get(k).unwrap();
            match (entry, other) {
                (CacheEntry::Item(a), CacheEntry::Item(b)) => assert_eq!(a, b),
                (CacheEntry::List(a), CacheEntry::List(b)) => assert_eq!(a, b),
                (CacheEntry::Page(a), CacheEntry::Page(b)) => assert_eq!(a, b),
                _ => panic!("entry kinds diverged for {k:?}"),
            }
        }
    }

    #[test]
    fn invalidation() {
        let mut cache = populated();
        assert_eq!(cache.comments.invalidate_pages(|q| q.page == 2), 1);
        assert!(cache.comments.page(&query(2)).is_none());
        assert!(cache.comments.page(&query(1)).is_some());
        assert_eq!(cache.comments.invalidate_all_pages(), 2);
        assert_eq!(cache.comments.pages().count(), 0);
        assert!(cache.comments.item(&CommentId(1)).is_some());
        assert!(cache.comments.list().is_some());
    }

    #[test]
    fn random_mutations_only_touch_matching_entries() {
        bolero::check!()
            .with_type::<(Vec<Vec<u8>>, u8)>()
            .cloned()
            .for_each(|(pages, target)| {
                let target = CommentId(i64::from(target % 8));
                let mut cache = QueryCache::new();
                for (i, ids) in pages.iter().enumerate() {
                    cache.comments.insert_page(
                        query(i as u32 + 1),
                        Page {
                            items: ids.iter().map(|id| comment(i64::from(id % 8), 1)).collect(),
                            count: ids.len() as i64,
                        },
                    );
                }
                let before: Vec<_> = cache
                    .comments
                    .pages()
                    .map(|(q, p)| (q.clone(), p.clone()))
                    .collect();
                apply_mutation::<Comment, _>(
                    &mut cache,
                    &target,
                    mutation::vote::<Comment>(Vote::Up),
                );
                for (q, old) in before {
                    let new = cache.comments.page(&q).unwrap();
                    assert_eq!(old.count, new.count);
                    assert_eq!(old.items.len(), new.items.len());
                    for (o, n) in old.items.iter().zip(new.items.iter()) {
                        assert_eq!(o.id, n.id);
                        if o.id == target {
                            assert_eq!(n.score, 11);
                            assert_eq!(n.my_vote, Vote::Up);
                        } else {
                            assert!(Arc::ptr_eq(o, n));
                        }
                    }
                    let had_target = old.items.iter().any(|e| e.id == target);
                    assert_eq!(Arc::ptr_eq(&old, new), !had_target);
                }
            })
    }
}
