//! CRUD over anomaly records and posts.
//!
//! Mutations are admin-gated through the policy checks and persist through
//! the store adapter on every change. Lookups and filtering run over the
//! in-memory collections; at archive scale a linear scan is the index.

use std::sync::{Arc, RwLock};

use crate::models::{
    AnomalyObject, AnomalyObjectPatch, NewAnomalyObject, NewPost, ObjectClass, Post, PostCategory,
    PostPatch,
};
use crate::services::{PolicyService, SessionManager};
use crate::storage::{ArchiveStore, Collections};

#[derive(Clone)]
pub struct ContentRepository {
    collections: Arc<RwLock<Collections>>,
    store: ArchiveStore,
    session: Arc<SessionManager>,
}

impl ContentRepository {
    pub fn new(
        collections: Arc<RwLock<Collections>>,
        store: ArchiveStore,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            collections,
            store,
            session,
        }
    }

    fn acting_username(&self) -> Option<String> {
        let user = self.session.current_user();
        if PolicyService::can_manage_content(user.as_ref()) {
            user.map(|u| u.username)
        } else {
            None
        }
    }

    // ==================== Anomaly records ====================

    pub fn objects(&self) -> Vec<AnomalyObject> {
        self.collections
            .read()
            .expect("collections lock poisoned")
            .objects
            .clone()
    }

    pub fn object_by_id(&self, id: &str) -> Option<AnomalyObject> {
        self.collections
            .read()
            .expect("collections lock poisoned")
            .objects
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    pub async fn create_object(&self, fields: NewAnomalyObject) -> Option<AnomalyObject> {
        let author = self.acting_username()?;
        let object = AnomalyObject::new(fields, &author);

        let mut collections = self.collections.write().expect("collections lock poisoned");
        collections.objects.push(object.clone());
        self.store.save(&collections);
        tracing::info!(object_id = %object.id, number = %object.number, "Anomaly record created");
        Some(object)
    }

    pub async fn update_object(&self, id: &str, patch: AnomalyObjectPatch) -> bool {
        if self.acting_username().is_none() {
            return false;
        }

        let mut collections = self.collections.write().expect("collections lock poisoned");
        let Some(object) = collections.objects.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        object.apply_patch(patch);
        self.store.save(&collections);
        true
    }

    pub async fn delete_object(&self, id: &str) -> bool {
        if self.acting_username().is_none() {
            return false;
        }

        let mut collections = self.collections.write().expect("collections lock poisoned");
        let Some(index) = collections.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        collections.objects.remove(index);
        self.store.save(&collections);
        tracing::info!(object_id = %id, "Anomaly record deleted");
        true
    }

    /// Filter records by class and a case-insensitive substring over the
    /// number and name.
    pub fn search_objects(&self, query: &str, class: Option<ObjectClass>) -> Vec<AnomalyObject> {
        let needle = query.trim().to_lowercase();
        self.collections
            .read()
            .expect("collections lock poisoned")
            .objects
            .iter()
            .filter(|o| class.map_or(true, |c| o.class == c))
            .filter(|o| {
                needle.is_empty()
                    || o.name.to_lowercase().contains(&needle)
                    || o.number.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    // ==================== Posts ====================

    pub fn posts(&self) -> Vec<Post> {
        self.collections
            .read()
            .expect("collections lock poisoned")
            .posts
            .clone()
    }

    pub fn post_by_id(&self, id: &str) -> Option<Post> {
        self.collections
            .read()
            .expect("collections lock poisoned")
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn create_post(&self, fields: NewPost) -> Option<Post> {
        let author = self.acting_username()?;
        let post = Post::new(fields, &author);

        let mut collections = self.collections.write().expect("collections lock poisoned");
        collections.posts.push(post.clone());
        self.store.save(&collections);
        tracing::info!(post_id = %post.id, "Post created");
        Some(post)
    }

    pub async fn update_post(&self, id: &str, patch: PostPatch) -> bool {
        if self.acting_username().is_none() {
            return false;
        }

        let mut collections = self.collections.write().expect("collections lock poisoned");
        let Some(post) = collections.posts.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        post.apply_patch(patch);
        self.store.save(&collections);
        true
    }

    pub async fn delete_post(&self, id: &str) -> bool {
        if self.acting_username().is_none() {
            return false;
        }

        let mut collections = self.collections.write().expect("collections lock poisoned");
        let Some(index) = collections.posts.iter().position(|p| p.id == id) else {
            return false;
        };
        collections.posts.remove(index);
        self.store.save(&collections);
        tracing::info!(post_id = %id, "Post deleted");
        true
    }

    /// Filter posts by category and a case-insensitive substring over the
    /// title and body.
    pub fn search_posts(&self, query: &str, category: Option<PostCategory>) -> Vec<Post> {
        let needle = query.trim().to_lowercase();
        self.collections
            .read()
            .expect("collections lock poisoned")
            .posts
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}
