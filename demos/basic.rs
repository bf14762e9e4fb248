use tdm_projector::{
    scatter_groups, AnalysisSession, GlobalWeight, LocalWeight, MemorySource, ProjectionKey,
    StaticLexicon,
};

fn main() {
    // tiny in-memory repository: four images under two search tags
    let lexicon = StaticLexicon::new(
        vec!["cat", "dog", "cute", "sunny", "park", "the", "a"],
        vec!["the", "a"],
    );
    let source = MemorySource {
        documents: vec![1u64, 2, 3, 4],
        tags: vec![
            (1, "cat".to_string()),
            (1, "cute".to_string()),
            (2, "cat".to_string()),
            (3, "dog".to_string()),
            (3, "park".to_string()),
            (4, "dog".to_string()),
        ],
        comments: vec![
            (1, "Such a cute cat! Posted 14 months ago".to_string()),
            (3, "Sunny day at the park".to_string()),
            (4, "A dog, a park and a sunny afternoon".to_string()),
        ],
        labels: vec![
            (1, "cat".to_string()),
            (2, "cat".to_string()),
            (3, "dog".to_string()),
            (4, "dog".to_string()),
        ],
    };

    let mut session = AnalysisSession::new();
    let key = ProjectionKey {
        vocab_size: 5,
        with_comments: true,
        local: LocalWeight::from_index(2),   // log
        global: GlobalWeight::from_index(1), // normal
    };

    let projection = session
        .project(key, &lexicon, &source)
        .expect("projection failed");
    println!("projection ({}x{}):", projection.nrows(), projection.ncols());
    println!("{projection:.4}");

    let labels = source.labels.clone();
    let groups = scatter_groups(projection, &labels, None).expect("grouping failed");
    for group in &groups {
        println!("{} [{}]: {:?}", group.label, group.color, group.points);
    }
}
