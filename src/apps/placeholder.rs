//! JSON-placeholder style demo data: posts, comments, users, todos, albums
//! and photos.
//!
//! Each collection sits behind a `dyn Repository`, so the same service runs
//! against the seeded in-memory data or, with the `http` feature, a remote
//! JSON-placeholder server.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RepositoryError;
use crate::repository::{Filter, InMemoryRepository, Latency, LatencyProfile, Repository};
use crate::{Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    pub post_id: RecordId,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub address: Address,
    pub phone: String,
    pub website: String,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: RecordId,
    pub album_id: RecordId,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

const POSTS: &[(&str, &str)] = &[
    (
        "sunt aut facere repellat provident",
        "quia et suscipit\n\
         suscipit recusandae consequuntur expedita et cum\n\
         reprehenderit molestiae ut ut quas totam\n\
         nostrum rerum est autem sunt rem eveniet architecto",
    ),
    (
        "qui est esse",
        "est rerum tempore vitae\n\
         sequi sint nihil reprehenderit dolor beatae ea dolores neque\n\
         fugiat blanditiis voluptate porro vel nihil molestiae ut reiciendis",
    ),
    (
        "ea molestias quasi exercitationem repellat",
        "et iusto sed quo iure\n\
         voluptatem occaecati omnis eligendi aut ad\n\
         voluptatem doloribus vel accusantium quis pariatur",
    ),
    (
        "eum et est occaecati",
        "ullam et saepe reiciendis voluptatem adipisci\n\
         sit amet autem assumenda provident rerum culpa",
    ),
    (
        "nesciunt quas odio",
        "repudiandae veniam quaerat sunt sed\n\
         alias aut fugiat sit autem sed est\n\
         voluptatem omnis possimus esse voluptatibus quis",
    ),
    (
        "dolorem eum magni eos aperiam quia",
        "ut aspernatur corporis harum nihil quis provident sequi\n\
         mollitia nobis aliquid molestiae\n\
         perspiciatis et ea nemo ab reprehenderit accusantium quas",
    ),
    (
        "magnam facilis autem",
        "dolore placeat quibusdam ea quo vitae\n\
         magni quis enim qui quis quo nemo aut saepe\n\
         quidem repellat excepturi ut quia",
    ),
    (
        "dolorem dolore est ipsam",
        "dignissimos aperiam dolorem qui eum\n\
         facilis quibusdam animi sint suscipit qui sint possimus cum\n\
         quaerat magni maiores excepturi",
    ),
    (
        "nesciunt iure omnis dolorem",
        "consectetur animi nesciunt iure dolore\n\
         enim quia ad\n\
         veniam autem ut quam aut nobis\n\
         et est aut quod aut provident voluptas autem voluptas",
    ),
    (
        "optio molestias id quia eum",
        "quo et expedita modi cum officia vel magni\n\
         doloribus qui repudiandae\n\
         vero nisi sit\n\
         quos veniam quod sed accusamus veritatis error",
    ),
];

const COMMENTS: &[(&str, &str, &str)] = &[
    (
        "id labore ex et quam laborum",
        "Eliseo@gardner.biz",
        "laudantium enim quasi est quidem magnam voluptate ipsam eos\n\
         tempora quo necessitatibus\n\
         dolor quam autem quasi\n\
         reiciendis et nam sapiente accusantium",
    ),
    (
        "quo vero reiciendis velit similique earum",
        "Jayne_Kuhic@sydney.com",
        "est natus enim nihil est dolore omnis voluptatem numquam\n\
         et omnis occaecati quod ullam at\n\
         voluptatem error expedita pariatur",
    ),
    (
        "odio adipisci rerum aut animi",
        "Nikita@garfield.biz",
        "quia molestiae reprehenderit quasi aspernatur\n\
         aut expedita occaecati aliquam eveniet laudantium\n\
         omnis quibusdam delectus saepe quia accusamus maiores nam est",
    ),
    (
        "alias odio sit",
        "Lew@alysha.tv",
        "non et atque\n\
         occaecati deserunt quas accusantium unde odit nobis qui voluptatem\n\
         quia voluptas consequuntur itaque dolor",
    ),
    (
        "vero eaque aliquid doloribus et culpa",
        "Hayden@althea.biz",
        "harum non quasi et ratione\n\
         tempore iure ex voluptates in ratione\n\
         harum architecto fugit inventore cupiditate",
    ),
];

const TODOS: &[(&str, bool)] = &[
    ("delectus aut autem", false),
    ("quis ut nam facilis et officia qui", false),
    ("fugiat veniam minus", false),
    ("et porro tempora", true),
    ("laboriosam mollitia et enim quasi adipisci quia provident illum", false),
    ("qui ullam ratione quibusdam voluptatem quia omnis", false),
    ("illo expedita consequatur quia in", false),
    ("quo adipisci enim quam ut ab", true),
    ("molestiae perspiciatis ipsa", false),
    ("illo est ratione doloremque quia maiores aut", true),
];

const ALBUMS: &[&str] = &[
    "quidem molestiae enim",
    "sunt qui excepturi placeat culpa",
    "omnis laborum odio",
    "non esse culpa molestiae omnis sed optio",
    "eaque aut omnis a",
    "natus impedit quibusdam illo est",
    "quibusdam autem aliquid et et quia",
    "qui fuga est a eum",
];

const PHOTO_COUNT: RecordId = 50;
const PHOTOS_PER_ALBUM: RecordId = 10;

fn numbered<T>(items: impl IntoIterator<Item = T>) -> impl Iterator<Item = (RecordId, T)> {
    (1..).zip(items)
}

pub fn seed_posts() -> Vec<Post> {
    numbered(POSTS)
        .map(|(id, (title, body))| Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: body.to_string(),
        })
        .collect()
}

pub fn seed_comments() -> Vec<Comment> {
    numbered(COMMENTS)
        .map(|(id, (name, email, body))| Comment {
            id,
            post_id: 1,
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
        })
        .collect()
}

pub fn seed_users() -> Vec<User> {
    let address = |street: &str, suite: &str, city: &str, zipcode: &str| Address {
        street: street.to_string(),
        suite: suite.to_string(),
        city: city.to_string(),
        zipcode: zipcode.to_string(),
    };
    let company = |name: &str, catch_phrase: &str, bs: &str| Company {
        name: name.to_string(),
        catch_phrase: catch_phrase.to_string(),
        bs: bs.to_string(),
    };

    vec![
        User {
            id: 1,
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            address: address("Kulas Light", "Apt. 556", "Gwenborough", "92998-3874"),
            phone: "1-770-736-8031 x56442".to_string(),
            website: "hildegard.org".to_string(),
            company: company(
                "Romaguera-Crona",
                "Multi-layered client-server neural-net",
                "harness real-time e-markets",
            ),
        },
        User {
            id: 2,
            name: "Ervin Howell".to_string(),
            username: "Antonette".to_string(),
            email: "Shanna@melissa.tv".to_string(),
            address: address("Victor Plains", "Suite 879", "Wisokyburgh", "90566-7771"),
            phone: "010-692-6593 x09125".to_string(),
            website: "anastasia.net".to_string(),
            company: company(
                "Deckow-Crist",
                "Proactive didactic contingency",
                "synergize scalable supply-chains",
            ),
        },
        User {
            id: 3,
            name: "Clementine Bauch".to_string(),
            username: "Samantha".to_string(),
            email: "Nathan@yesenia.net".to_string(),
            address: address(
                "Douglas Extension",
                "Suite 847",
                "McKenziehaven",
                "59590-4157",
            ),
            phone: "1-463-123-4447".to_string(),
            website: "ramiro.info".to_string(),
            company: company(
                "Romaguera-Jacobson",
                "Face to face bifurcated interface",
                "e-enable strategic applications",
            ),
        },
    ]
}

pub fn seed_todos() -> Vec<Todo> {
    numbered(TODOS)
        .map(|(id, (title, completed))| Todo {
            id,
            user_id: 1,
            title: title.to_string(),
            completed: *completed,
        })
        .collect()
}

pub fn seed_albums() -> Vec<Album> {
    numbered(ALBUMS)
        .map(|(id, title)| Album {
            id,
            user_id: 1,
            title: title.to_string(),
        })
        .collect()
}

/// Fifty photos, ten per album, with a colour derived from the photo id.
pub fn seed_photos() -> Vec<Photo> {
    (1..=PHOTO_COUNT)
        .map(|id| {
            let (r, g, b) = (id % 16, (id * 7) % 16, (id * 13) % 16);
            let colour = format!("{r:02X}{g:02X}{b:02X}");
            Photo {
                id,
                album_id: (id - 1) / PHOTOS_PER_ALBUM + 1,
                title: format!("accusamus beatae ad facilis cum similique qui sunt {id}"),
                url: format!("https://via.placeholder.com/600/{colour}"),
                thumbnail_url: format!("https://via.placeholder.com/150/{colour}"),
            }
        })
        .collect()
}

/// Where the todos live. In memory they can be flipped in place.
#[derive(Clone)]
enum TodoStore {
    Local(InMemoryRepository<Todo>),
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    Remote(Arc<dyn Repository<Todo>>),
}

impl TodoStore {
    fn repository(&self) -> &dyn Repository<Todo> {
        match self {
            TodoStore::Local(todos) => todos,
            TodoStore::Remote(todos) => todos.as_ref(),
        }
    }
}

/// Read access to the placeholder collections, plus todo toggling.
#[derive(Clone)]
pub struct PlaceholderService {
    posts: Arc<dyn Repository<Post>>,
    comments: Arc<dyn Repository<Comment>>,
    users: Arc<dyn Repository<User>>,
    todos: TodoStore,
    albums: Arc<dyn Repository<Album>>,
    photos: Arc<dyn Repository<Photo>>,
}

impl PlaceholderService {
    pub fn default_latency() -> LatencyProfile {
        LatencyProfile {
            get: Latency::fixed(50),
            ..LatencyProfile::uniform(Latency::fixed(100))
        }
    }

    /// The built-in demo data, held in memory.
    pub fn seeded(latency: LatencyProfile) -> Self {
        let service = Self {
            posts: Arc::new(InMemoryRepository::with_records(seed_posts(), latency)),
            comments: Arc::new(InMemoryRepository::with_records(seed_comments(), latency)),
            users: Arc::new(InMemoryRepository::with_records(seed_users(), latency)),
            todos: TodoStore::Local(InMemoryRepository::with_records(seed_todos(), latency)),
            albums: Arc::new(InMemoryRepository::with_records(seed_albums(), latency)),
            photos: Arc::new(InMemoryRepository::with_records(seed_photos(), latency)),
        };
        info!("placeholder data seeded");
        service
    }

    /// Read the collections from a JSON-placeholder compatible server.
    #[cfg(feature = "http")]
    pub fn remote(base_url: &str) -> Self {
        use crate::http::HttpRepository;

        let client = reqwest::Client::new();
        Self {
            posts: Arc::new(HttpRepository::with_client(client.clone(), base_url)),
            comments: Arc::new(HttpRepository::with_client(client.clone(), base_url)),
            users: Arc::new(HttpRepository::with_client(client.clone(), base_url)),
            todos: TodoStore::Remote(Arc::new(HttpRepository::with_client(
                client.clone(),
                base_url,
            ))),
            albums: Arc::new(HttpRepository::with_client(client.clone(), base_url)),
            photos: Arc::new(HttpRepository::with_client(client, base_url)),
        }
    }

    pub async fn posts(&self) -> Result<Vec<Post>, RepositoryError> {
        self.posts.list_all().await
    }

    pub async fn post(&self, id: RecordId) -> Result<Option<Post>, RepositoryError> {
        self.posts.get_by_id(id).await
    }

    pub async fn comments(&self) -> Result<Vec<Comment>, RepositoryError> {
        self.comments.list_all().await
    }

    pub async fn post_comments(&self, post_id: RecordId) -> Result<Vec<Comment>, RepositoryError> {
        let on_post: &Filter<'_, Comment> = &move |comment: &Comment| comment.post_id == post_id;
        self.comments.list(Some(on_post)).await
    }

    pub async fn users(&self) -> Result<Vec<User>, RepositoryError> {
        self.users.list_all().await
    }

    pub async fn user(&self, id: RecordId) -> Result<Option<User>, RepositoryError> {
        self.users.get_by_id(id).await
    }

    pub async fn todos(&self) -> Result<Vec<Todo>, RepositoryError> {
        self.todos.repository().list_all().await
    }

    pub async fn user_todos(&self, user_id: RecordId) -> Result<Vec<Todo>, RepositoryError> {
        let owned: &Filter<'_, Todo> = &move |todo: &Todo| todo.user_id == user_id;
        self.todos.repository().list(Some(owned)).await
    }

    /// Flip a todo's `completed` flag. False when there is no such todo.
    ///
    /// In memory this is one atomic mutation. Against a remote server it is
    /// a read followed by a write, so a concurrent writer can slip in between.
    pub async fn toggle_todo(&self, id: RecordId) -> Result<bool, RepositoryError> {
        let todos = match &self.todos {
            TodoStore::Local(todos) => {
                let flip = |todo: &mut Todo| todo.completed = !todo.completed;
                return todos.modify(id, flip).await;
            }
            TodoStore::Remote(todos) => todos,
        };
        match todos.get_by_id(id).await? {
            Some(mut todo) => {
                todo.completed = !todo.completed;
                todos.update(todo).await
            }
            None => Ok(false),
        }
    }

    pub async fn albums(&self) -> Result<Vec<Album>, RepositoryError> {
        self.albums.list_all().await
    }

    pub async fn user_albums(&self, user_id: RecordId) -> Result<Vec<Album>, RepositoryError> {
        let owned: &Filter<'_, Album> = &move |album: &Album| album.user_id == user_id;
        self.albums.list(Some(owned)).await
    }

    pub async fn photos(&self) -> Result<Vec<Photo>, RepositoryError> {
        self.photos.list_all().await
    }

    pub async fn album_photos(&self, album_id: RecordId) -> Result<Vec<Photo>, RepositoryError> {
        let in_album: &Filter<'_, Photo> = &move |photo: &Photo| photo.album_id == album_id;
        self.photos.list(Some(in_album)).await
    }
}
