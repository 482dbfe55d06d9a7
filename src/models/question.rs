use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 一道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            options,
        }
    }
}

/// `GET /questions` 的返回值：题目 ID → 题目
///
/// 保持服务端返回的顺序，渲染时按这个顺序展示。服务端在没有题目时返回 `null`，
/// 这里解析为空集合。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionCollection {
    entries: Vec<(String, Question)>,
}

impl QuestionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, question)| question)
    }

    /// 插入或替换；替换时保持原位置
    pub fn insert(&mut self, id: impl Into<String>, question: Question) {
        let id = id.into();
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some(entry) => entry.1 = question,
            None => self.entries.push((id, question)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Question)> {
        self.entries.iter().map(|(id, q)| (id.as_str(), q))
    }
}

impl FromIterator<(String, Question)> for QuestionCollection {
    fn from_iter<I: IntoIterator<Item = (String, Question)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (id, question) in iter {
            collection.insert(id, question);
        }
        collection
    }
}

impl Serialize for QuestionCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(id, q)| (id, q)))
    }
}

impl<'de> Deserialize<'de> for QuestionCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = QuestionCollection;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of question id to question, or null")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionCollection::new())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(QuestionCollection::new())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = QuestionCollection::new();
                while let Some((id, question)) = map.next_entry::<String, Question>()? {
                    collection.insert(id, question);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_any(CollectionVisitor)
    }
}

/// `POST /token` 的返回值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /token` 的请求体
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    pub email: &'a str,
}
