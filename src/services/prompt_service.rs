use crate::models::topic::Topic;

/// How many questions of each type a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distribution {
    pub multiple_choice: usize,
    pub true_false: usize,
    pub fill_blank: usize,
}

impl Distribution {
    /// Splits `total` by multiple-choice/true-false/fill-blank weights.
    /// True/false and fill-blank round down; multiple choice takes the rest.
    pub fn split(total: usize, weights: (usize, usize, usize)) -> Self {
        let (mc, tf, fb) = weights;
        let sum = (mc + tf + fb).max(1);
        let true_false = total * tf / sum;
        let fill_blank = total * fb / sum;
        Self {
            multiple_choice: total - true_false - fill_blank,
            true_false,
            fill_blank,
        }
    }

    pub fn total(&self) -> usize {
        self.multiple_choice + self.true_false + self.fill_blank
    }
}

pub const QUIZ_WEIGHTS: (usize, usize, usize) = (3, 1, 1);
pub const EXAM_WEIGHTS: (usize, usize, usize) = (2, 1, 1);

const QUESTION_JSON_EXAMPLE: &str = r#"{
  "questions": [
    {
      "id": 1,
      "type": "multiple_choice",
      "question": "Question text here",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 2,
      "explanation": "Why option C is correct"
    },
    {
      "id": 2,
      "type": "true_false",
      "question": "True or False: statement here",
      "correctAnswer": 0,
      "explanation": "0 means True, 1 means False"
    },
    {
      "id": 3,
      "type": "fill_blank",
      "question": "Sentence with exactly one _____ to complete",
      "correctAnswer": "missing term",
      "explanation": "Why this term completes the sentence"
    }
  ]
}"#;

const TYPE_RULES: &str = "For fill-in-the-blank questions:
- Ask for specific, meaningful concepts or terms from the content
- Use exactly one blank written as _____
- Ensure the blank represents a real concept from the content
- Avoid asking for \"processes\" when the answer is actually a topic name

For True/False questions:
- Base on clear, factual statements from the content
- Avoid ambiguous or unclear statements
- correctAnswer is 0 for True and 1 for False

For multiple choice questions:
- Provide exactly 4 options
- Focus on testing understanding, not memorization
- Ensure all options are plausible and related to the content
- Vary the position of the correct option";

fn distribution_block(total: usize, dist: &Distribution) -> String {
    format!(
        "Generate exactly {} questions using this distribution:\n\
         - {} multiple choice questions (4 options each)\n\
         - {} True/False questions\n\
         - {} fill-in-the-blank questions",
        total, dist.multiple_choice, dist.true_false, dist.fill_blank
    )
}

/// Prompt for a quiz on a single topic.
pub fn quiz_prompt(topic: &Topic, file_content: &str, count: usize) -> String {
    let dist = Distribution::split(count, QUIZ_WEIGHTS);
    let concepts = topic
        .key_concepts
        .as_ref()
        .filter(|c| !c.is_empty())
        .map(|c| c.join(", "))
        .unwrap_or_else(|| topic.title.clone());

    format!(
        "You are an expert educator creating a quiz for a specific learning topic.\n\n\
         CRITICAL REQUIREMENTS:\n\
         1. Generate questions ONLY from the provided topic content - do not ask about topics not mentioned\n\
         2. Questions must be logical and make sense - avoid circular reasoning or nonsensical phrasing\n\
         3. Each question should test genuine understanding of the specific topic, not generic knowledge\n\
         4. Fill-in-the-blank questions must ask for specific concepts, processes, or terms that actually exist in the topic content\n\
         5. True/False questions must be based on clear, factual statements from the topic content\n\
         6. Multiple choice questions must have plausible distractors that relate to the actual topic content\n\
         7. Every question must include an explanation\n\n\
         TOPIC: {title}\n\
         TOPIC DESCRIPTION: {description}\n\
         DIFFICULTY: {difficulty}\n\
         KEY CONCEPTS: {concepts}\n\
         TOPIC CONTENT: {content}\n\n\
         {distribution}\n\n\
         {rules}\n\n\
         Return the questions in this exact JSON format:\n{example}",
        title = topic.title,
        description = topic.description,
        difficulty = topic.difficulty.as_str(),
        concepts = concepts,
        content = file_content,
        distribution = distribution_block(count, &dist),
        rules = TYPE_RULES,
        example = QUESTION_JSON_EXAMPLE,
    )
}

/// Prompt for a final exam spanning every selected topic.
pub fn final_exam_prompt(topics: &[Topic], file_content: &str, count: usize) -> String {
    let dist = Distribution::split(count, EXAM_WEIGHTS);
    let topic_lines = topics
        .iter()
        .map(|t| format!("- {} ({})", t.title, t.difficulty.as_str()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert educator creating a comprehensive final exam based on the following document content.\n\n\
         CRITICAL REQUIREMENTS:\n\
         1. Generate questions ONLY from the provided document content - do not ask about topics not mentioned\n\
         2. Questions must be logical and make sense - avoid circular reasoning or nonsensical phrasing\n\
         3. Each question should test genuine understanding of the content, not trivial details\n\
         4. Fill-in-the-blank questions must ask for specific concepts, processes, or terms that actually exist in the content\n\
         5. True/False questions must be based on clear, factual statements from the content\n\
         6. Multiple choice questions must have plausible distractors that relate to the actual content\n\
         7. Spread the questions across all of the topics below\n\n\
         TOPICS:\n{topics}\n\n\
         DOCUMENT CONTENT:\n{content}\n\n\
         {distribution}\n\n\
         {rules}\n\n\
         Return the questions in this exact JSON format:\n{example}",
        topics = topic_lines,
        content = file_content,
        distribution = distribution_block(count, &dist),
        rules = TYPE_RULES,
        example = QUESTION_JSON_EXAMPLE,
    )
}

/// Prompt for turning the user's comma-separated topic names into topics.
pub fn topics_prompt(user_topics: &str, topic_count: usize) -> String {
    format!(
        "You are an expert educator analyzing a document to create focused learning topics.\n\n\
         CRITICAL REQUIREMENTS:\n\
         1. Generate topics ONLY from the provided document content - do not create topics not mentioned\n\
         2. Each topic must be a genuine, meaningful concept from the document\n\
         3. Topics should be specific and focused, not generic or vague\n\
         4. Avoid creating topics that are too broad or don't relate to the actual content\n\
         5. Each topic should represent a distinct learning objective that can be tested\n\n\
         USER REQUESTED TOPICS: {user_topics}\n\n\
         Generate exactly {topic_count} learning topics based on the user's request. Each topic should:\n\
         - Be directly related to the user's requested topics\n\
         - Represent a specific, testable concept\n\
         - Have a clear, descriptive title\n\
         - Include a brief description of what will be learned\n\
         - Be at an appropriate difficulty level (Beginner/Intermediate/Advanced)\n\n\
         Return the topics in this exact JSON format:\n\
         {{\n  \"topics\": [\n    {{\n      \"id\": \"topic_1\",\n      \"title\": \"Specific topic title\",\n      \
         \"description\": \"Brief description of what this topic covers\",\n      \"difficulty\": \"Beginner\",\n      \
         \"keyConcepts\": [\"concept1\", \"concept2\"]\n    }}\n  ]\n}}",
        user_topics = user_topics,
        topic_count = topic_count,
    )
}
