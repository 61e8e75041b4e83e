//! Knowledge context assembler: shapes knowledge search output into citation
//! sources, with multi-hop retrieval for policy questions

use shoptalk_types::{KnowledgeSearch, KnowledgeSource, Reranker};
use tracing::{debug, warn};

/// Assembled knowledge context for one turn
#[derive(Debug, Clone, Default)]
pub struct KnowledgeContext {
	pub sources: Vec<KnowledgeSource>,
	pub decomposition_used: bool,
	pub decomposition_reason: Option<String>,
}

/// Retrieve and shape knowledge sources
///
/// Policy questions go through the multi-hop `retrieve` path; everything
/// else is a single-shot search. Search failures degrade to an empty
/// context, and rerank failures keep the original ordering.
pub async fn assemble_knowledge(
	knowledge: &dyn KnowledgeSearch,
	reranker: Option<&dyn Reranker>,
	query: &str,
	embedding: &[f32],
	limit: usize,
	is_policy_intent: bool,
	category: Option<&str>,
) -> KnowledgeContext {
	let mut context = if is_policy_intent {
		match knowledge.retrieve(query, embedding, limit).await {
			Ok(retrieval) => KnowledgeContext {
				sources: retrieval.sources,
				decomposition_used: retrieval.decomposition_used,
				decomposition_reason: retrieval.decomposition_reason,
			},
			Err(e) => {
				warn!("Multi-hop knowledge retrieval failed: {}", e);
				KnowledgeContext::default()
			},
		}
	} else {
		match knowledge.search(query, embedding, limit, category).await {
			Ok(sources) => KnowledgeContext {
				sources,
				decomposition_used: false,
				decomposition_reason: None,
			},
			Err(e) => {
				warn!("Knowledge search failed: {}", e);
				KnowledgeContext::default()
			},
		}
	};

	if let Some(reranker) = reranker {
		if reranker.is_enabled() && context.sources.len() > 1 {
			match reranker.rescore(query, context.sources.clone()).await {
				Ok(rescored) => {
					debug!("Reranked {} knowledge sources", rescored.len());
					context.sources = rescored;
				},
				Err(e) => {
					warn!("Rerank failed, keeping original order: {}", e);
				},
			}
		}
	}

	context
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use shoptalk_types::{KnowledgeRetrieval, SearchError, SearchResult, SourceKind};

	#[derive(Debug)]
	struct StubKnowledge {
		fail: bool,
		decompose: bool,
	}

	#[async_trait]
	impl KnowledgeSearch for StubKnowledge {
		async fn search(
			&self,
			_query: &str,
			_embedding: &[f32],
			limit: usize,
			_category: Option<&str>,
		) -> SearchResult<Vec<KnowledgeSource>> {
			if self.fail {
				return Err(SearchError::Unavailable {
					reason: "down".to_string(),
				});
			}
			Ok((0..limit.min(2))
				.map(|i| {
					KnowledgeSource::new(
						format!("Article {}", i),
						"snippet".to_string(),
						0.9,
						SourceKind::Knowledge,
					)
				})
				.collect())
		}

		async fn retrieve(
			&self,
			query: &str,
			embedding: &[f32],
			limit: usize,
		) -> SearchResult<KnowledgeRetrieval> {
			if self.decompose {
				let sources = self.search(query, embedding, limit, None).await?;
				return Ok(KnowledgeRetrieval {
					sources,
					decomposition_used: true,
					decomposition_reason: Some("multiple policy topics".to_string()),
				});
			}
			let sources = self.search(query, embedding, limit, None).await?;
			Ok(KnowledgeRetrieval::simple(sources))
		}
	}

	#[tokio::test]
	async fn test_policy_intent_uses_multi_hop_path() {
		let knowledge = StubKnowledge {
			fail: false,
			decompose: true,
		};
		let context =
			assemble_knowledge(&knowledge, None, "shipping and returns", &[0.1], 5, true, None)
				.await;

		assert!(context.decomposition_used);
		assert_eq!(context.sources.len(), 2);
	}

	#[tokio::test]
	async fn test_plain_question_uses_single_shot_search() {
		let knowledge = StubKnowledge {
			fail: false,
			decompose: true,
		};
		let context =
			assemble_knowledge(&knowledge, None, "opening hours", &[0.1], 5, false, None).await;

		assert!(!context.decomposition_used);
		assert_eq!(context.sources.len(), 2);
	}

	#[tokio::test]
	async fn test_search_failure_degrades_to_empty_context() {
		let knowledge = StubKnowledge {
			fail: true,
			decompose: false,
		};
		let context =
			assemble_knowledge(&knowledge, None, "opening hours", &[0.1], 5, false, None).await;

		assert!(context.sources.is_empty());
	}
}
